//! Terminal dashboard built on ratatui
//!
//! Running `questa` with no subcommand lands here: a quest board with a
//! level gauge, a badge gallery, a new-quest form, and vim-style `:`
//! commands. The TUI owns the [`QuestLog`] for its whole lifetime and
//! every mutation persists immediately, so quitting never loses state.

mod app;
mod command;
mod ui;

pub use app::App;
pub use command::Command;

use anyhow::Result;

use crate::config::Config;
use crate::quest::QuestLog;

/// Start the interactive dashboard
pub fn run(log: QuestLog, config: &Config) -> Result<()> {
    App::new(log, config).run()
}
