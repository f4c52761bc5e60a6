//! Color constants and shared styles for the TUI

use ratatui::style::Color;

use crate::domain::{Difficulty, Priority, QuestStatus};

// VIVID color constants - direct usage for clarity
pub const CYAN: Color = Color::Cyan;
pub const GREEN: Color = Color::LightGreen;
pub const YELLOW: Color = Color::Yellow;
pub const RED: Color = Color::LightRed;
pub const MAGENTA: Color = Color::Magenta;
pub const BLUE: Color = Color::LightBlue;
pub const WHITE: Color = Color::White;
pub const GRAY: Color = Color::Gray;
pub const DARK_GRAY: Color = Color::DarkGray;

pub fn status_color(status: QuestStatus) -> Color {
    match status {
        QuestStatus::Pending => YELLOW,
        QuestStatus::Active => BLUE,
        QuestStatus::Blocked => RED,
        QuestStatus::Completed => GREEN,
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => GREEN,
        Difficulty::Medium => YELLOW,
        Difficulty::Hard => RED,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => DARK_GRAY,
        Priority::Medium => GRAY,
        Priority::High => YELLOW,
        Priority::Critical => RED,
    }
}
