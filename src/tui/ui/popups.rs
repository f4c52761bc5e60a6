//! Popup rendering (help popup, delete confirmation, toasts)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::{Toast, ToastKind};

use super::colors::*;

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render the keyboard shortcut popup
pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(55, 60, frame.area());
    frame.render_widget(Clear, area);

    let row = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<9}"), Style::default().fg(YELLOW)),
            Span::styled(desc, Style::default().fg(WHITE)),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("↑/↓ j/k", "Navigate quests"),
        row("Enter", "Complete selected quest"),
        row("n", "New quest"),
        row("a", "Mark selected quest active"),
        row("x", "Mark selected quest blocked"),
        row("p", "Mark selected quest pending"),
        row("d", "Delete selected quest"),
        row("f", "Cycle status filter"),
        row("/", "Search titles and notes"),
        row("Tab", "Switch between board and badges"),
        row(":", "Command prompt (:quit :back :help)"),
        row("?", "Toggle this help"),
        row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc or ? to close",
            Style::default().fg(DARK_GRAY),
        )),
    ];

    let popup = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(CYAN))
            .title(" Help "),
    );

    frame.render_widget(popup, area);
}

/// Render the delete confirmation popup
pub fn render_confirm_delete(frame: &mut Frame, title: &str, warnings: &[String]) {
    let area = centered_rect(55, 35, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Delete ", Style::default().fg(WHITE)),
            Span::styled(
                format!("'{title}'"),
                Style::default().fg(YELLOW).add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(WHITE)),
        ]),
        Line::from(""),
    ];
    for warning in warnings {
        lines.push(Line::from(Span::styled(
            format!("  ⚠ {warning}"),
            Style::default().fg(RED),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  y delete · n / Esc cancel",
        Style::default().fg(DARK_GRAY),
    )));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(RED))
            .title(Span::styled(
                " Confirm ",
                Style::default().fg(RED).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(popup, area);
}

/// Render transient toasts stacked above the help bar
pub fn render_toasts(frame: &mut Frame, toasts: &[Toast]) {
    if toasts.is_empty() {
        return;
    }

    let screen = frame.area();
    let width = toasts
        .iter()
        .map(|t| t.text.chars().count() as u16 + 4)
        .max()
        .unwrap_or(20)
        .min(screen.width);
    let height = toasts.len() as u16;
    if screen.height < height + 2 {
        return;
    }

    let area = Rect {
        x: screen.width.saturating_sub(width + 1),
        y: screen.height.saturating_sub(height + 2),
        width,
        height,
    };
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = toasts
        .iter()
        .map(|toast| {
            let color = match toast.kind {
                ToastKind::Info => GRAY,
                ToastKind::Success => GREEN,
                ToastKind::Badge => MAGENTA,
                ToastKind::Error => RED,
            };
            Line::from(Span::styled(
                format!(" {} ", toast.text),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
