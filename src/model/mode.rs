use std::path::PathBuf;

/// Top-level input state of the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    CommandLine,
    SearchLine,
    RenameLine,
    ConflictRenameLine,
}

impl Mode {
    pub fn is_line_entry(self) -> bool {
        self != Mode::Normal
    }

    /// Short label for the status bar
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::CommandLine => "COMMAND",
            Mode::SearchLine => "SEARCH",
            Mode::RenameLine => "RENAME",
            Mode::ConflictRenameLine => "PASTE AS",
        }
    }

    /// Prompt shown in front of the line input
    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Normal => "",
            Mode::CommandLine => ":",
            Mode::SearchLine => "/",
            Mode::RenameLine => "rename: ",
            Mode::ConflictRenameLine => "paste as: ",
        }
    }
}

/// What happens to the submitted text of the active line-entry mode.
/// Installed on entering the mode, consumed on submit or cancel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineHandler {
    /// Run a registered command
    Command,
    /// Search forward and remember the text for `SearchNext`
    Search,
    /// Rename the entry that was current when the mode was entered
    Rename { target: PathBuf },
    /// Copy the yanked entry under a new name after a paste collision
    ConflictRename { source: PathBuf },
}

impl LineHandler {
    pub fn mode(&self) -> Mode {
        match self {
            LineHandler::Command => Mode::CommandLine,
            LineHandler::Search => Mode::SearchLine,
            LineHandler::Rename { .. } => Mode::RenameLine,
            LineHandler::ConflictRename { .. } => Mode::ConflictRenameLine,
        }
    }
}
