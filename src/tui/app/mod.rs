//! Main TUI application

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use super::command::Command;
use super::ui;
use crate::config::Config;
use crate::domain::{Difficulty, Priority, Quest, QuestStatus};
use crate::quest::{QuestFilter, QuestLog, QuestUpdate};

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 5;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum View {
    Board,
    Badges,
    NewQuest,
}

/// Where keystrokes go outside the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InputMode {
    Normal,
    Command,
    Search,
}

/// Transient notification shown in the corner
pub(super) struct Toast {
    pub(super) text: String,
    pub(super) kind: ToastKind,
    created: Instant,
}

#[derive(Debug, Clone, Copy)]
pub(super) enum ToastKind {
    Info,
    Success,
    Badge,
    Error,
}

/// Focusable fields of the new-quest form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormField {
    Title,
    Difficulty,
    Priority,
    Notes,
}

/// In-progress new-quest form state
pub(super) struct QuestForm {
    pub(super) title: String,
    pub(super) notes: String,
    pub(super) difficulty: Difficulty,
    pub(super) priority: Priority,
    pub(super) focus: FormField,
}

impl QuestForm {
    fn fresh() -> Self {
        Self {
            title: String::new(),
            notes: String::new(),
            difficulty: Difficulty::Medium,
            priority: Priority::Medium,
            focus: FormField::Title,
        }
    }
}

/// Pending delete awaiting a y/n answer
pub(super) struct ConfirmDelete {
    id: String,
    pub(super) title: String,
    pub(super) warnings: Vec<String>,
}

/// Main TUI application state
pub struct App {
    pub(super) log: QuestLog,
    tick_rate: Duration,
    pub(super) show_hidden_badges: bool,

    pub(super) view: View,
    pub(super) input_mode: InputMode,
    pub(super) selected: usize,
    status_filter: Option<QuestStatus>,
    command_buffer: String,
    search_query: String,
    pub(super) form: QuestForm,
    pub(super) confirm_delete: Option<ConfirmDelete>,
    pub(super) show_help: bool,
    pub(super) toasts: Vec<Toast>,
    should_quit: bool,
}

impl App {
    pub fn new(log: QuestLog, config: &Config) -> Self {
        Self {
            log,
            tick_rate: Duration::from_millis(config.tick_ms.max(10)),
            show_hidden_badges: config.show_hidden_badges,
            view: View::Board,
            input_mode: InputMode::Normal,
            selected: 0,
            status_filter: None,
            command_buffer: String::new(),
            search_query: String::new(),
            form: QuestForm::fresh(),
            confirm_delete: None,
            show_help: false,
            toasts: Vec::new(),
            should_quit: false,
        }
    }

    /// Run the TUI until the user quits
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal even if the loop errored
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.clamp_selection();
            terminal.draw(|frame| ui::render(frame, self))?;

            // The poll timeout doubles as the tick: an expired poll still
            // redraws, which is what ages toasts out. Resize needs no
            // handling; the next draw picks up the new frame size.
            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.prune_toasts();
        }

        Ok(())
    }

    /// Quests currently visible on the board, in display order
    pub(super) fn visible_quests(&self) -> Vec<&Quest> {
        if !self.search_query.is_empty() {
            self.log.search(&self.search_query)
        } else {
            let filter = QuestFilter {
                status: self.status_filter,
                ..QuestFilter::default()
            };
            self.log.quests(&filter)
        }
    }

    pub(super) fn filter_label(&self) -> String {
        if !self.search_query.is_empty() {
            format!("search: {}", self.search_query)
        } else {
            match self.status_filter {
                Some(status) => status.label().to_lowercase(),
                None => String::new(),
            }
        }
    }

    pub(super) fn prompt_buffer(&self) -> &str {
        match self.input_mode {
            InputMode::Command => &self.command_buffer,
            InputMode::Search => &self.search_query,
            InputMode::Normal => "",
        }
    }

    fn selected_quest_id(&self) -> Option<String> {
        self.visible_quests().get(self.selected).map(|q| q.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_quests().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn push_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toasts.push(Toast {
            text: text.into(),
            kind,
            created: Instant::now(),
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    fn prune_toasts(&mut self) {
        self.toasts.retain(|t| t.created.elapsed() < TOAST_TTL);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from any mode, even mid-form
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.confirm_delete.is_some() {
            self.handle_confirm_key(key.code);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Command => self.handle_command_key(key.code),
            InputMode::Search => self.handle_search_key(key.code),
            InputMode::Normal => match self.view {
                View::NewQuest => self.handle_form_key(key.code),
                View::Board | View::Badges => self.handle_board_key(key.code),
            },
        }
    }

    fn handle_board_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(':') => {
                self.command_buffer.clear();
                self.input_mode = InputMode::Command;
            }
            KeyCode::Tab => {
                self.view = match self.view {
                    View::Badges => View::Board,
                    _ => View::Badges,
                };
            }
            KeyCode::Esc if self.view == View::Badges => self.view = View::Board,
            _ if self.view == View::Badges => {}

            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_quests().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('/') => {
                self.search_query.clear();
                self.input_mode = InputMode::Search;
            }
            KeyCode::Esc => {
                // Clear an applied search filter
                self.search_query.clear();
            }
            KeyCode::Char('f') => {
                self.status_filter = match self.status_filter {
                    None => Some(QuestStatus::Pending),
                    Some(QuestStatus::Pending) => Some(QuestStatus::Active),
                    Some(QuestStatus::Active) => Some(QuestStatus::Blocked),
                    Some(QuestStatus::Blocked) => Some(QuestStatus::Completed),
                    Some(QuestStatus::Completed) => None,
                };
            }
            KeyCode::Char('n') => {
                self.form = QuestForm::fresh();
                self.view = View::NewQuest;
            }
            KeyCode::Enter | KeyCode::Char('c') => self.complete_selected(),
            KeyCode::Char('a') => self.set_selected_status(QuestStatus::Active),
            KeyCode::Char('x') => self.set_selected_status(QuestStatus::Blocked),
            KeyCode::Char('p') => self.set_selected_status(QuestStatus::Pending),
            KeyCode::Char('d') => self.request_delete(),
            _ => {}
        }
    }

    fn handle_command_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.command_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => self.command_buffer.push(c),
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.command_buffer);
                self.input_mode = InputMode::Normal;
                match Command::parse(&input) {
                    Ok(Command::Quit) => self.should_quit = true,
                    Ok(Command::Back) => {
                        self.view = View::Board;
                        self.show_help = false;
                    }
                    Ok(Command::Help) => self.show_help = !self.show_help,
                    Err(e) => self.push_toast(ToastKind::Error, e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_query.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                // Keep the query applied as a board filter
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(c) => self.search_query.push(c),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.view = View::Board,
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus = match self.form.focus {
                    FormField::Title => FormField::Difficulty,
                    FormField::Difficulty => FormField::Priority,
                    FormField::Priority => FormField::Notes,
                    FormField::Notes => FormField::Title,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus = match self.form.focus {
                    FormField::Title => FormField::Notes,
                    FormField::Difficulty => FormField::Title,
                    FormField::Priority => FormField::Difficulty,
                    FormField::Notes => FormField::Priority,
                };
            }
            KeyCode::Left => match self.form.focus {
                FormField::Difficulty => self.form.difficulty = cycle(Difficulty::all(), self.form.difficulty, -1),
                FormField::Priority => self.form.priority = cycle(Priority::all(), self.form.priority, -1),
                _ => {}
            },
            KeyCode::Right => match self.form.focus {
                FormField::Difficulty => self.form.difficulty = cycle(Difficulty::all(), self.form.difficulty, 1),
                FormField::Priority => self.form.priority = cycle(Priority::all(), self.form.priority, 1),
                _ => {}
            },
            KeyCode::Backspace => match self.form.focus {
                FormField::Title => {
                    self.form.title.pop();
                }
                FormField::Notes => {
                    self.form.notes.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) => match self.form.focus {
                FormField::Title => self.form.title.push(c),
                FormField::Notes => self.form.notes.push(c),
                _ => {}
            },
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(confirm) = self.confirm_delete.take() {
                    match self.log.delete_quest(&confirm.id, true) {
                        Ok(removed) => {
                            self.push_toast(ToastKind::Info, format!("Deleted '{}'", removed.title));
                        }
                        Err(e) => self.push_toast(ToastKind::Error, format!("{e:#}")),
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let notes = if self.form.notes.trim().is_empty() {
            None
        } else {
            Some(self.form.notes.clone())
        };

        match self.log.create_quest(
            &self.form.title,
            self.form.difficulty,
            self.form.priority,
            notes,
        ) {
            Ok(quest) => {
                self.push_toast(ToastKind::Success, format!("Added '{}'", quest.title));
                self.view = View::Board;
            }
            Err(e) => self.push_toast(ToastKind::Error, format!("{e:#}")),
        }
    }

    fn complete_selected(&mut self) {
        let Some(id) = self.selected_quest_id() else {
            return;
        };

        match self.log.complete_quest(&id) {
            Ok(report) => {
                self.push_toast(
                    ToastKind::Success,
                    format!("+{} XP · '{}'", report.xp.total, report.quest.title),
                );
                if report.leveled_up {
                    self.push_toast(
                        ToastKind::Success,
                        format!("Level up! Now level {}", report.new_level),
                    );
                }
                for badge in &report.unlocked {
                    self.push_toast(
                        ToastKind::Badge,
                        format!("{} {} unlocked!", badge.icon, badge.name),
                    );
                }
            }
            Err(e) => self.push_toast(ToastKind::Error, format!("{e:#}")),
        }
    }

    fn set_selected_status(&mut self, status: QuestStatus) {
        let Some(id) = self.selected_quest_id() else {
            return;
        };

        let update = QuestUpdate {
            status: Some(status),
            ..QuestUpdate::default()
        };
        if let Err(e) = self.log.update_quest(&id, update) {
            self.push_toast(ToastKind::Error, format!("{e:#}"));
        }
    }

    fn request_delete(&mut self) {
        let Some(id) = self.selected_quest_id() else {
            return;
        };

        match self.log.deletion_check(&id) {
            Ok(check) if check.requires_confirmation => {
                let title = match self.log.quest(&id) {
                    Ok(quest) => quest.title.clone(),
                    Err(_) => id.clone(),
                };
                self.confirm_delete = Some(ConfirmDelete {
                    id,
                    title,
                    warnings: check.warnings,
                });
            }
            Ok(_) => match self.log.delete_quest(&id, false) {
                Ok(removed) => {
                    self.push_toast(ToastKind::Info, format!("Deleted '{}'", removed.title));
                }
                Err(e) => self.push_toast(ToastKind::Error, format!("{e:#}")),
            },
            Err(e) => self.push_toast(ToastKind::Error, e.to_string()),
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let pos = all.iter().position(|&v| v == current).unwrap_or(0) as isize;
    all[((pos + step).rem_euclid(len)) as usize]
}
