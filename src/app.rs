// Desktop shell: the browser state that implements `Host`, and the eframe
// application that feeds it keys through the engine.

use crate::config::Config;
use crate::engine::{EngineError, ModalEngine};
use crate::entry::FileEntry;
use crate::host::{Host, HostError};
use crate::input::keyboard;
use crate::io;
use crate::model::{Mode, Operation};
use crate::style::{self, Theme};
use eframe::egui;
use std::cell::RefCell;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct StatusMessage {
    pub text: String,
    pub shown_at: Instant,
    /// 0 keeps the message until it is replaced
    pub timeout_secs: u32,
}

impl StatusMessage {
    pub fn remaining(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            return None;
        }
        Some(Duration::from_secs(u64::from(self.timeout_secs)).saturating_sub(self.shown_at.elapsed()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }
}

/// Directory listing and view state; everything the engine touches
pub struct Browser {
    pub current_path: PathBuf,
    pub entries: Vec<FileEntry>,
    pub parent_entries: Vec<FileEntry>,
    pub selected_index: Option<usize>,
    /// Row where visual selection started
    pub visual_anchor: Option<usize>,
    pub multi_selection: bool,
    /// Rows drawn in the last frame
    pub visible_rows: Range<usize>,
    pub scroll_to_selection: bool,
    pub show_hidden: bool,
    pub use_trash: bool,
    pub theme: Theme,
    pub status: Option<StatusMessage>,
    pub status_timeout_secs: u32,
    pub line_input: String,
    pub focus_line: bool,
    pub line_cursor_to_end: bool,
    pub exit_requested: bool,
    /// Question asked once, with the time; asking again in time confirms
    pub pending_confirmation: Option<(String, Instant)>,
    /// Chord shown in the confirmation hint
    pub delete_chord: String,
}

impl Browser {
    pub fn new(start_path: PathBuf, config: &Config) -> Self {
        let mut browser = Self {
            current_path: start_path,
            entries: Vec::new(),
            parent_entries: Vec::new(),
            selected_index: None,
            visual_anchor: None,
            multi_selection: false,
            visible_rows: 0..0,
            scroll_to_selection: true,
            show_hidden: config.ui.show_hidden,
            use_trash: config.ui.use_trash,
            theme: Theme::from_name(&config.theme.colorscheme).unwrap_or(Theme::Dark),
            status: None,
            status_timeout_secs: config.ui.status_timeout_secs,
            line_input: String::new(),
            focus_line: false,
            line_cursor_to_end: false,
            exit_requested: false,
            pending_confirmation: None,
            delete_chord: Operation::Delete.default_chord().to_string(),
        };
        browser.refresh_entries();
        browser
    }

    fn set_status(&mut self, text: impl Into<String>) {
        let timeout = self.status_timeout_secs;
        self.show_status(&text.into(), timeout);
    }

    /// Reloads entries for current AND parent directory
    pub fn refresh_entries(&mut self) {
        match io::read_directory(&self.current_path, self.show_hidden) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                warn!("Cannot read {}: {}", self.current_path.display(), e);
                self.entries.clear();
                self.set_status(format!("Error reading directory: {}", e));
            }
        }

        self.selected_index = match self.selected_index {
            _ if self.entries.is_empty() => None,
            Some(row) => Some(row.min(self.entries.len() - 1)),
            None => Some(0),
        };

        self.parent_entries = self
            .current_path
            .parent()
            .and_then(|parent| io::read_directory(parent, self.show_hidden).ok())
            .unwrap_or_default();
    }

    fn select_path(&mut self, path: &Path) {
        if let Some(row) = self.entries.iter().position(|e| e.path == path) {
            self.select_row(row);
        }
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            debug!("Entering {}", path.display());
            self.current_path = path;
            self.selected_index = None;
            self.multi_selection = false;
            self.visual_anchor = None;
            self.scroll_to_selection = true;
            self.refresh_entries();
        } else if let Err(e) = io::open_with_default(&path) {
            self.set_status(format!("Could not open file: {}", e));
        }
    }

    pub fn navigate_up(&mut self) {
        if let Some(parent) = self.current_path.parent() {
            // Land on the directory we just left
            let old_current = self.current_path.clone();
            self.navigate_to(parent.to_path_buf());
            self.select_path(&old_current);
        }
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        match (self.multi_selection, self.visual_anchor, self.selected_index) {
            (true, Some(anchor), Some(current)) => {
                (anchor.min(current)..=anchor.max(current)).contains(&row)
            }
            _ => self.selected_index == Some(row),
        }
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_index.and_then(|row| self.entries.get(row))
    }
}

impl Host for Browser {
    fn open_child_of_selection(&mut self) {
        if let Some(path) = self.selected_entry().map(|e| e.path.clone()) {
            self.navigate_to(path);
        }
    }

    fn open_parent(&mut self) {
        self.navigate_up();
    }

    fn select_row(&mut self, row: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected_index = Some(row.min(self.entries.len() - 1));
        self.scroll_to_selection = true;
    }

    fn current_row(&self) -> Option<usize> {
        self.selected_index
    }

    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn is_row_visible(&self, row: usize) -> bool {
        self.visible_rows.contains(&row)
    }

    fn current_entry_path(&self) -> Option<PathBuf> {
        self.selected_entry().map(|e| e.path.clone())
    }

    fn current_directory_path(&self) -> PathBuf {
        self.current_path.clone()
    }

    fn make_directory(&mut self, name: &str) -> Result<(), HostError> {
        let path = io::create_directory(&self.current_path, name)?;
        self.refresh_entries();
        self.select_path(&path);
        Ok(())
    }

    fn create_empty_file(&mut self, name: &str) -> Result<(), HostError> {
        let path = io::create_file(&self.current_path, name)?;
        self.refresh_entries();
        self.select_path(&path);
        Ok(())
    }

    fn remove_entry(&mut self, path: &Path) -> Result<(), HostError> {
        io::remove_entry(path, self.use_trash)?;
        self.refresh_entries();
        Ok(())
    }

    fn rename_entry(&mut self, path: &Path, new_name: &str) -> Result<(), HostError> {
        let dest = io::rename_entry(path, new_name)?;
        self.refresh_entries();
        self.select_path(&dest);
        Ok(())
    }

    fn copy_entry(&mut self, source: &Path, dest_dir: &Path, dest_name: &str) -> Result<(), HostError> {
        let dest = io::copy_entry(source, dest_dir, dest_name)?;
        if dest_dir == self.current_path {
            self.refresh_entries();
            self.select_path(&dest);
        }
        Ok(())
    }

    fn open_with_default_handler(&mut self, path: &Path) -> Result<(), HostError> {
        io::open_with_default(path)
    }

    fn change_directory(&mut self, path: &Path) -> Result<(), HostError> {
        if !path.exists() {
            return Err(HostError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(HostError::Unsupported(format!("{} is not a directory", path.display())));
        }
        self.navigate_to(path.to_path_buf());
        Ok(())
    }

    fn set_color_scheme(&mut self, name: &str) {
        match Theme::from_name(name) {
            Some(theme) => self.theme = theme,
            None => debug!("No built-in color scheme named {}", name),
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        let window = Duration::from_secs(style::CONFIRM_WINDOW_SECS);
        if let Some((asked, at)) = self.pending_confirmation.take() {
            if asked == question && at.elapsed() <= window {
                return true;
            }
        }
        self.pending_confirmation = Some((question.to_string(), Instant::now()));
        let hint = format!(
            "{} (press {} again to confirm)",
            question.replace('\n', " "),
            self.delete_chord
        );
        self.show_status(&hint, style::CONFIRM_WINDOW_SECS as u32);
        false
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn set_multi_selection_enabled(&mut self, enabled: bool) {
        self.multi_selection = enabled;
        self.visual_anchor = if enabled { self.selected_index } else { None };
    }

    fn is_multi_selection_enabled(&self) -> bool {
        self.multi_selection
    }

    fn show_status(&mut self, message: &str, timeout_secs: u32) {
        self.status = Some(StatusMessage {
            text: message.to_string(),
            shown_at: Instant::now(),
            timeout_secs,
        });
    }

    fn focus_line_input(&mut self, initial: &str) {
        self.line_input = initial.to_string();
        self.focus_line = true;
        self.line_cursor_to_end = true;
    }

    fn focus_main_view(&mut self) {
        self.line_input.clear();
        self.focus_line = false;
    }

    fn search_forward(&mut self, text: &str) {
        match io::find_next(&self.entries, self.selected_index, text) {
            Some(row) => self.select_row(row),
            None => self.set_status(format!("Pattern not found: {}", text)),
        }
    }
}

pub struct App {
    engine: ModalEngine,
    browser: Browser,
    applied_theme: Option<Theme>,
}

impl App {
    pub fn new(config: &Config, start_path: PathBuf) -> Result<Self, EngineError> {
        let engine = ModalEngine::new(&config.engine_settings())?;
        let mut browser = Browser::new(start_path, config);
        if let Some(chord) = engine.keymap().chord_for(Operation::Delete) {
            browser.delete_chord = chord.to_string();
        }
        Ok(Self {
            engine,
            browser,
            applied_theme: None,
        })
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        if self.engine.mode().is_line_entry() {
            self.handle_line_keys(ctx);
            return;
        }

        let keys = ctx.input(|i| keyboard::pressed_keys(&i.events));
        for key in keys {
            self.engine.handle_key(&mut self.browser, key);
            if self.engine.mode().is_line_entry() {
                // The key that opened the line must not be typed into it
                ctx.input_mut(|i| i.events.retain(|e| !matches!(e, egui::Event::Text(_))));
                break;
            }
        }
    }

    /// Enter and Escape belong to the engine, and so does Tab on the
    /// command line; everything else is left for the text field
    fn handle_line_keys(&mut self, ctx: &egui::Context) {
        let completes = self.engine.mode() == Mode::CommandLine;
        let (submit, cancel, tab) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::NONE, egui::Key::Enter),
                i.consume_key(egui::Modifiers::NONE, egui::Key::Escape),
                completes && i.consume_key(egui::Modifiers::NONE, egui::Key::Tab),
            )
        });

        if tab {
            if let Some(completion) = self.engine.complete_line(&self.browser.line_input) {
                self.browser.line_input = completion;
                self.browser.line_cursor_to_end = true;
            }
        }
        if submit {
            let text = std::mem::take(&mut self.browser.line_input);
            self.engine.submit_line(&mut self.browser, &text);
        } else if cancel {
            self.engine.cancel_line(&mut self.browser);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.browser.theme) {
            self.browser.theme.apply(ctx);
            self.applied_theme = Some(self.browser.theme);
        }

        self.handle_input(ctx);

        if self.browser.exit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if self.browser.status.as_ref().is_some_and(StatusMessage::is_expired) {
            self.browser.status = None;
        }
        if let Some(left) = self.browser.status.as_ref().and_then(StatusMessage::remaining) {
            ctx.request_repaint_after(left);
        }

        // Deferred actions
        let next_navigation = RefCell::new(None);
        let next_selection = RefCell::new(None);
        let mode = self.engine.mode();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(self.browser.current_path.display().to_string()).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.checkbox(&mut self.browser.show_hidden, "Hidden").changed() {
                        self.browser.refresh_entries();
                    }
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            self.browser
                .render_status_bar(ui, mode, &self.engine.pending().to_string());
        });

        if mode.is_line_entry() {
            egui::TopBottomPanel::bottom("line_panel").show(ctx, |ui| {
                if self.browser.render_line_input(ui, mode.prompt()) {
                    self.engine.line_edited();
                }
            });
        }

        egui::SidePanel::left("parent_panel")
            .resizable(true)
            .default_width(style::PARENT_DEFAULT)
            .show(ctx, |ui| self.browser.render_parent_pane(ui, &next_navigation));

        egui::SidePanel::right("details_panel")
            .resizable(true)
            .default_width(style::DETAILS_DEFAULT)
            .show(ctx, |ui| self.browser.render_details_pane(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.browser
                .render_current_pane(ui, &next_selection, &next_navigation);
        });

        // Apply deferred actions
        if let Some(row) = next_selection.into_inner() {
            self.browser.select_row(row);
        }
        if let Some(path) = next_navigation.into_inner() {
            self.browser.navigate_to(path);
        }
    }
}
