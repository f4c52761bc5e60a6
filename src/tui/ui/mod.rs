//! UI rendering functions
//!
//! This module is split into submodules for better organization:
//! - `colors`: Color constants and shared styles
//! - `quest_list`: Quest board panel rendering
//! - `player_panel`: Level gauge header and stats side panel
//! - `badges_view`: Badge gallery with per-badge progress
//! - `form`: New-quest form popup
//! - `help_bar`: Bottom key-hint bar and `:`/`/` prompt
//! - `popups`: Help popup, delete confirmation, toasts

mod badges_view;
mod colors;
mod form;
mod help_bar;
mod player_panel;
mod popups;
mod quest_list;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::{App, View};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    player_panel::render_header(frame, chunks[0], app.log.player());

    match app.view {
        View::Badges => badges_view::render(
            frame,
            chunks[1],
            app.log.achievements(),
            app.log.player(),
            app.show_hidden_badges,
        ),
        View::Board | View::NewQuest => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(chunks[1]);

            let quests = app.visible_quests();
            quest_list::render(frame, body[0], &quests, app.selected, &app.filter_label());
            player_panel::render_side(
                frame,
                body[1],
                app.log.player(),
                &app.log.counts(),
                app.log.achievements(),
            );
        }
    }

    help_bar::render(frame, chunks[2], &app.input_mode, app.prompt_buffer());

    if app.view == View::NewQuest {
        form::render(frame, &app.form);
    }

    if let Some(confirm) = &app.confirm_delete {
        popups::render_confirm_delete(frame, &confirm.title, &confirm.warnings);
    }

    if app.show_help {
        popups::render_help(frame);
    }

    popups::render_toasts(frame, &app.toasts);
}
