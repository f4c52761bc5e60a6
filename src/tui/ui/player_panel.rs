//! Player header and stats side panel rendering

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::Player;
use crate::quest::StatusCounts;
use crate::stats::achievements::AchievementEngine;

use super::colors::*;

/// Render the level gauge across the top of the screen
pub fn render_header(frame: &mut Frame, area: Rect, player: &Player) {
    let level = player.level();
    let span = player.xp_for_next_level() - player.xp_for_current_level();
    let label = format!(
        "Level {}  {} / {} XP",
        level,
        player.current_level_xp(),
        span
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MAGENTA))
                .title(Span::styled(
                    " QUESTA ",
                    Style::default().fg(MAGENTA).add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(MAGENTA))
        .ratio(player.level_progress().clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}

/// Render the stats side panel next to the quest board
pub fn render_side(
    frame: &mut Frame,
    area: Rect,
    player: &Player,
    counts: &StatusCounts,
    engine: &AchievementEngine,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total XP   ", Style::default().fg(GRAY)),
            Span::styled(
                player.total_xp.to_string(),
                Style::default().fg(YELLOW).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Streak     ", Style::default().fg(GRAY)),
            Span::styled(
                format!("{} 🔥", player.current_streak),
                Style::default().fg(RED),
            ),
        ]),
        Line::from(vec![
            Span::styled("Completed  ", Style::default().fg(GRAY)),
            Span::styled(player.tasks_completed.to_string(), Style::default().fg(GREEN)),
            Span::styled(
                format!(
                    "  ({}/{}/{})",
                    player.easy_tasks_completed,
                    player.medium_tasks_completed,
                    player.hard_tasks_completed
                ),
                Style::default().fg(DARK_GRAY),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Board      ", Style::default().fg(GRAY)),
            Span::styled(format!("{} pending", counts.pending), Style::default().fg(YELLOW)),
        ]),
        Line::from(vec![
            Span::styled("           ", Style::default()),
            Span::styled(format!("{} active", counts.active), Style::default().fg(BLUE)),
        ]),
        Line::from(vec![
            Span::styled("           ", Style::default()),
            Span::styled(format!("{} blocked", counts.blocked), Style::default().fg(RED)),
        ]),
        Line::from(vec![
            Span::styled("           ", Style::default()),
            Span::styled(format!("{} done", counts.completed), Style::default().fg(GREEN)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Badges     ", Style::default().fg(GRAY)),
            Span::styled(
                format!("{} / {}", engine.unlocked_count(), engine.catalog().len()),
                Style::default().fg(CYAN),
            ),
        ]),
    ];

    // Most recent unlocks, newest first
    let mut unlocked = engine.unlocked_achievements();
    unlocked.sort_by_key(|(_, at)| std::cmp::Reverse(*at));
    for (badge, _) in unlocked.iter().take(3) {
        lines.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                format!("{} {}", badge.icon, badge.name),
                Style::default().fg(WHITE),
            ),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DARK_GRAY))
            .title(Span::styled(
                " Stats ",
                Style::default().fg(GRAY).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(panel, area);
}
