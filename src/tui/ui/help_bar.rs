//! Help bar and prompt line rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::InputMode;

use super::colors::*;

/// Render the bottom bar: key hints, or the live `:`/`/` prompt
pub fn render(frame: &mut Frame, area: Rect, mode: &InputMode, buffer: &str) {
    let line = match mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(YELLOW)),
            Span::styled(buffer.to_string(), Style::default().fg(WHITE)),
            Span::styled("▏", Style::default().fg(YELLOW)),
        ]),
        InputMode::Search => Line::from(vec![
            Span::styled("/", Style::default().fg(CYAN)),
            Span::styled(buffer.to_string(), Style::default().fg(WHITE)),
            Span::styled("▏", Style::default().fg(CYAN)),
        ]),
        InputMode::Normal => Line::from(vec![
            Span::styled(" ↑↓ ", Style::default().fg(Color::Black).bg(WHITE)),
            Span::styled(" Nav ", Style::default().fg(GRAY)),
            Span::styled(" ⏎ ", Style::default().fg(Color::Black).bg(GREEN)),
            Span::styled(" Done ", Style::default().fg(GRAY)),
            Span::styled(" n ", Style::default().fg(Color::Black).bg(GREEN)),
            Span::styled(" New ", Style::default().fg(GRAY)),
            Span::styled(" d ", Style::default().fg(Color::Black).bg(RED)),
            Span::styled(" Delete ", Style::default().fg(GRAY)),
            Span::styled(" f ", Style::default().fg(Color::Black).bg(BLUE)),
            Span::styled(" Filter ", Style::default().fg(GRAY)),
            Span::styled(" ⇥ ", Style::default().fg(Color::Black).bg(MAGENTA)),
            Span::styled(" Badges ", Style::default().fg(GRAY)),
            Span::styled(" ? ", Style::default().fg(Color::Black).bg(CYAN)),
            Span::styled(" Help ", Style::default().fg(GRAY)),
            Span::styled(" q ", Style::default().fg(Color::Black).bg(GRAY)),
            Span::styled(" Quit ", Style::default().fg(GRAY)),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}
