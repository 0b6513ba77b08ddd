//! Modal input engine
//!
//! Turns key presses into operations while in normal mode, and submitted
//! line text into commands, searches or renames while a line-entry mode is
//! active. Every effect goes through the [`Host`].

mod operations;
mod search;

pub use search::SearchController;

use crate::commands::{CommandRegistry, CompletionCycler, RegistryError};
use crate::host::{Host, HostError};
use crate::input::{Key, KeySymbol, Keymap, KeymapError, PendingSequence, Resolution, DEFAULT_MAX_CHORD_LENGTH};
use crate::model::{Clipboard, LineHandler, Mode, Operation};
use operations::OperationHandler;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_STATUS_TIMEOUT_SECS: u32 = 4;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid key bindings: {0}")]
    Keymap(#[from] KeymapError),
    #[error("invalid command table: {0}")]
    Registry(#[from] RegistryError),
}

/// Construction-time knobs, normally taken from the config file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    pub max_chord_length: usize,
    pub status_timeout_secs: u32,
    /// Operation name -> chord notation, replacing the built-in chord
    pub bindings: BTreeMap<String, String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_chord_length: DEFAULT_MAX_CHORD_LENGTH,
            status_timeout_secs: DEFAULT_STATUS_TIMEOUT_SECS,
            bindings: BTreeMap::new(),
        }
    }
}

pub struct ModalEngine {
    keymap: Keymap,
    handlers: [OperationHandler; Operation::COUNT],
    pending: PendingSequence,
    /// Installed while a line-entry mode is active; `None` means normal mode
    line: Option<LineHandler>,
    commands: CommandRegistry,
    completion: CompletionCycler,
    search: SearchController,
    clipboard: Clipboard,
    status_timeout_secs: u32,
}

impl fmt::Debug for ModalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalEngine")
            .field("mode", &self.mode())
            .field("pending", &self.pending)
            .field("keymap", &self.keymap)
            .field("commands", &self.commands)
            .field("clipboard", &self.clipboard)
            .finish_non_exhaustive()
    }
}

impl ModalEngine {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        let keymap = Keymap::with_overrides(settings.max_chord_length, &settings.bindings)?;
        for (short, long) in keymap.shadowed() {
            warn!(
                "Chord for {} is a prefix of the chord for {} and will never fire",
                short, long
            );
        }

        Ok(Self {
            keymap,
            handlers: operations::handler_table(),
            pending: PendingSequence::new(),
            line: None,
            commands: CommandRegistry::with_builtins(settings.status_timeout_secs)?,
            completion: CompletionCycler::new(),
            search: SearchController::new(),
            clipboard: Clipboard::new(),
            status_timeout_secs: settings.status_timeout_secs,
        })
    }

    pub fn mode(&self) -> Mode {
        self.line.as_ref().map_or(Mode::Normal, LineHandler::mode)
    }

    pub fn pending(&self) -> &PendingSequence {
        &self.pending
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// For registering extra commands after construction
    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn last_search(&self) -> Option<&str> {
        self.search.last()
    }

    /// Feed one key press. Returns `false` when the key is not meant for
    /// the engine and should reach the focused widget instead.
    pub fn handle_key(&mut self, host: &mut dyn Host, key: Key) -> bool {
        if self.line.is_some() {
            if key == Key::new(KeySymbol::Escape) {
                self.cancel_line(host);
                return true;
            }
            return false;
        }

        match key.symbol {
            KeySymbol::Escape => {
                self.pending.clear();
                if host.is_multi_selection_enabled() {
                    host.set_multi_selection_enabled(false);
                    if let Some(row) = host.current_row() {
                        host.select_row(row);
                    }
                }
                true
            }
            KeySymbol::Slash if key == Key::new(KeySymbol::Slash) => {
                self.enter_line(host, LineHandler::Search, "");
                true
            }
            KeySymbol::Colon => self.push_chord_key(host, key),
            symbol if symbol.is_letter() => self.push_chord_key(host, key),
            _ => false,
        }
    }

    fn push_chord_key(&mut self, host: &mut dyn Host, key: Key) -> bool {
        self.pending.push(key);
        match self.keymap.resolve(self.pending.keys()) {
            Resolution::Pending => {}
            Resolution::Fire(operation) => {
                self.pending.clear();
                self.run(operation, host);
            }
            Resolution::Abandon => {
                debug!("No chord matches {}", self.pending);
                self.pending.clear();
            }
        }
        true
    }

    fn run(&mut self, operation: Operation, host: &mut dyn Host) {
        debug!("Running {}", operation);
        let handler = self.handlers[operation.index()];
        handler(self, host);
    }

    /// Submit the line text of the active line-entry mode. The engine is
    /// back in normal mode afterwards, whatever the handler did.
    pub fn submit_line(&mut self, host: &mut dyn Host, text: &str) {
        let Some(handler) = self.line.take() else {
            return;
        };
        self.pending.clear();
        self.completion.reset();
        host.focus_main_view();
        debug!("Submitting {:?} to {:?}", text, handler.mode());

        match handler {
            LineHandler::Command => self.run_command_line(host, text),
            LineHandler::Search => self.search.submit(host, text),
            LineHandler::Rename { target } => self.rename_to(host, &target, text),
            LineHandler::ConflictRename { source } => self.copy_as(host, &source, text),
        }
    }

    /// Leave the line-entry mode without running its handler
    pub fn cancel_line(&mut self, host: &mut dyn Host) {
        if let Some(handler) = self.line.take() {
            debug!("Cancelled {:?}", handler.mode());
            self.pending.clear();
            self.completion.reset();
            host.focus_main_view();
        }
    }

    /// Tab on the command line: the next completion for `text`, or `None`
    /// when there is nothing to complete
    pub fn complete_line(&mut self, text: &str) -> Option<String> {
        if self.mode() != Mode::CommandLine {
            return None;
        }
        if !self.completion.is_active() && !self.completion.begin(text) {
            return None;
        }
        self.completion.next(&self.commands)
    }

    /// The line was edited by the user; completion starts over next time
    pub fn line_edited(&mut self) {
        self.completion.reset();
    }

    fn enter_line(&mut self, host: &mut dyn Host, handler: LineHandler, initial: &str) {
        debug!("Entering {:?}", handler.mode());
        self.pending.clear();
        self.completion.reset();
        self.line = Some(handler);
        host.focus_line_input(initial);
    }

    fn report(&self, host: &mut dyn Host, message: &str) {
        host.show_status(message, self.status_timeout_secs);
    }

    fn run_command_line(&mut self, host: &mut dyn Host, text: &str) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(name) = tokens.first() else {
            return;
        };
        if !self.commands.dispatch(host, &tokens) {
            self.report(host, &format!("Unknown command: {}", name));
        }
    }

    fn rename_to(&mut self, host: &mut dyn Host, target: &Path, new_name: &str) {
        if new_name.is_empty() {
            return;
        }
        match host.rename_entry(target, new_name) {
            Ok(()) => {}
            Err(HostError::AlreadyExists(_)) => self.report(host, "Rename target already exists"),
            Err(e) => {
                warn!("Rename of {} failed: {}", target.display(), e);
                self.report(host, &format!("Rename failed: {}", e));
            }
        }
    }

    fn copy_as(&mut self, host: &mut dyn Host, source: &Path, dest_name: &str) {
        if dest_name.is_empty() {
            return;
        }
        let dest_dir = host.current_directory_path();
        match host.copy_entry(source, &dest_dir, dest_name) {
            Ok(()) => {}
            Err(HostError::AlreadyExists(_)) => {
                self.report(host, "The file being copied with that name already exists")
            }
            Err(e) => self.report_copy_error(host, source, e),
        }
    }

    fn report_copy_error(&self, host: &mut dyn Host, source: &Path, error: HostError) {
        match error {
            HostError::NotFound(ref path) if path == source => {
                self.report(host, "The file being copied no longer exists")
            }
            other => {
                warn!("Copy of {} failed: {}", source.display(), other);
                self.report(host, "Unexpected copy error");
            }
        }
    }

    /// Path that a paste would copy, if anything has been yanked
    pub fn yanked(&self) -> Option<PathBuf> {
        self.clipboard.path().map(Path::to_path_buf)
    }
}
