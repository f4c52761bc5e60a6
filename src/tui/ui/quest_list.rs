//! Quest board panel rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::domain::{Quest, QuestStatus};

use super::colors::*;

fn status_icon(status: QuestStatus) -> &'static str {
    match status {
        QuestStatus::Pending => "○",
        QuestStatus::Active => "◐",
        QuestStatus::Blocked => "⊘",
        QuestStatus::Completed => "●",
    }
}

/// Render the quest board panel
pub fn render(
    frame: &mut Frame,
    area: Rect,
    quests: &[&Quest],
    selected: usize,
    filter_label: &str,
) {
    let items: Vec<ListItem> = quests
        .iter()
        .enumerate()
        .map(|(i, quest)| {
            let content = Line::from(vec![
                Span::styled(
                    format!("{} ", status_icon(quest.status)),
                    Style::default().fg(status_color(quest.status)),
                ),
                Span::styled(
                    format!("{:<6} ", quest.difficulty.label()),
                    Style::default().fg(difficulty_color(quest.difficulty)),
                ),
                Span::styled(
                    format!("{:<8} ", quest.priority.label()),
                    Style::default().fg(priority_color(quest.priority)),
                ),
                Span::styled(&quest.title, Style::default().fg(WHITE)),
                Span::styled(
                    format!("  +{} XP", quest.xp_reward),
                    Style::default().fg(DARK_GRAY),
                ),
            ]);

            let style = if i == selected {
                Style::default().bg(Color::Rgb(80, 80, 100))
            } else {
                Style::default()
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = if filter_label.is_empty() {
        " Quests ".to_string()
    } else {
        format!(" Quests ({filter_label}) ")
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(CYAN))
            .title(Span::styled(
                title,
                Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(list, area);
}
