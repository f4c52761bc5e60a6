//! New-quest form popup rendering

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{Difficulty, Priority};
use crate::tui::app::{FormField, QuestForm};

use super::colors::*;
use super::popups::centered_rect;

fn field_label(name: &str, focused: bool) -> Span<'_> {
    if focused {
        Span::styled(
            format!("▸ {name:<11}"),
            Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("  {name:<11}"), Style::default().fg(GRAY))
    }
}

fn choice_row<'a, T: PartialEq>(
    all: &'a [T],
    current: &T,
    label: impl Fn(&T) -> &'a str,
) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for item in all {
        let style = if item == current {
            Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DARK_GRAY)
        };
        spans.push(Span::styled(format!("[{}] ", label(item)), style));
    }
    spans
}

/// Render the new-quest form as a centered popup
pub fn render(frame: &mut Frame, form: &QuestForm) {
    let area = centered_rect(60, 45, frame.area());
    frame.render_widget(Clear, area);

    let title_cursor = if form.focus == FormField::Title { "▏" } else { "" };
    let notes_cursor = if form.focus == FormField::Notes { "▏" } else { "" };

    let mut difficulty_row = vec![field_label("Difficulty", form.focus == FormField::Difficulty)];
    difficulty_row.extend(choice_row(
        Difficulty::all(),
        &form.difficulty,
        |d: &Difficulty| d.label(),
    ));

    let mut priority_row = vec![field_label("Priority", form.focus == FormField::Priority)];
    priority_row.extend(choice_row(
        Priority::all(),
        &form.priority,
        |p: &Priority| p.label(),
    ));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            field_label("Title", form.focus == FormField::Title),
            Span::styled(
                format!("{}{}", form.title, title_cursor),
                Style::default().fg(WHITE),
            ),
        ]),
        Line::from(""),
        Line::from(difficulty_row),
        Line::from(""),
        Line::from(priority_row),
        Line::from(""),
        Line::from(vec![
            field_label("Notes", form.focus == FormField::Notes),
            Span::styled(
                format!("{}{}", form.notes, notes_cursor),
                Style::default().fg(WHITE),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Tab next field · ←/→ change value · Enter create · Esc cancel",
            Style::default().fg(DARK_GRAY),
        )),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GREEN))
            .title(Span::styled(
                " New Quest ",
                Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(popup, area);
}
