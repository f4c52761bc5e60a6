//! Badge gallery view rendering

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::domain::Player;
use crate::stats::achievements::{AchievementCategory, AchievementEngine};

use super::colors::*;

const BAR_WIDTH: usize = 20;

fn progress_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '█' } else { '·' });
    }
    bar
}

/// Render the full badge gallery, grouped by category
pub fn render(
    frame: &mut Frame,
    area: Rect,
    engine: &AchievementEngine,
    player: &Player,
    show_hidden: bool,
) {
    let mut items: Vec<ListItem> = Vec::new();

    for category in AchievementCategory::all() {
        let badges = engine.achievements_in_category(*category);
        if badges.is_empty() {
            continue;
        }

        items.push(ListItem::new(Line::from(Span::styled(
            category.label(),
            Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
        ))));

        for badge in badges {
            let unlocked = engine.is_unlocked(badge.id);
            if badge.hidden && !unlocked && !show_hidden {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled("  ❓ ", Style::default().fg(DARK_GRAY)),
                    Span::styled("???", Style::default().fg(DARK_GRAY)),
                ])));
                continue;
            }

            let ratio = engine.progress(badge.id.as_str(), player).unwrap_or(0.0);
            let (name_style, bar_color) = if unlocked {
                (
                    Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
                    GREEN,
                )
            } else {
                (Style::default().fg(WHITE), YELLOW)
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {} ", badge.icon), Style::default()),
                Span::styled(format!("{:<18}", badge.name), name_style),
                Span::styled(progress_bar(ratio), Style::default().fg(bar_color)),
                Span::styled(
                    format!(" {:>3.0}%  ", ratio * 100.0),
                    Style::default().fg(GRAY),
                ),
                Span::styled(badge.description, Style::default().fg(DARK_GRAY)),
            ])));
        }

        items.push(ListItem::new(Line::from("")));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(CYAN))
            .title(Span::styled(
                " Badges ",
                Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::progress_bar;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(progress_bar(0.0).chars().count(), 20);
        assert_eq!(progress_bar(0.5).chars().count(), 20);
        assert_eq!(progress_bar(1.0).chars().count(), 20);
    }

    #[test]
    fn bar_fill_tracks_ratio() {
        assert!(progress_bar(0.0).chars().all(|c| c == '·'));
        assert!(progress_bar(1.0).chars().all(|c| c == '█'));
        assert_eq!(progress_bar(0.5).chars().filter(|&c| c == '█').count(), 10);
    }
}
