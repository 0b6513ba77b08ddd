use std::fmt;

/// Actions that a completed normal-mode chord can trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    OpenParent,
    OpenChild,
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    SelectHigh,
    SelectMiddle,
    SelectLow,
    Delete,
    Rename,
    Yank,
    Paste,
    SearchNext,
    EnterVisual,
    EnterCommandLine,
    Exit,
}

impl Operation {
    /// Every operation, in declaration order
    pub const ALL: [Operation; 17] = [
        Operation::OpenParent,
        Operation::OpenChild,
        Operation::SelectNext,
        Operation::SelectPrevious,
        Operation::SelectFirst,
        Operation::SelectLast,
        Operation::SelectHigh,
        Operation::SelectMiddle,
        Operation::SelectLow,
        Operation::Delete,
        Operation::Rename,
        Operation::Yank,
        Operation::Paste,
        Operation::SearchNext,
        Operation::EnterVisual,
        Operation::EnterCommandLine,
        Operation::Exit,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in fixed-size per-operation tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used for keybinding overrides in the config file
    pub fn name(self) -> &'static str {
        match self {
            Operation::OpenParent => "open_parent",
            Operation::OpenChild => "open_child",
            Operation::SelectNext => "select_next",
            Operation::SelectPrevious => "select_previous",
            Operation::SelectFirst => "select_first",
            Operation::SelectLast => "select_last",
            Operation::SelectHigh => "select_high",
            Operation::SelectMiddle => "select_middle",
            Operation::SelectLow => "select_low",
            Operation::Delete => "delete",
            Operation::Rename => "rename",
            Operation::Yank => "yank",
            Operation::Paste => "paste",
            Operation::SearchNext => "search_next",
            Operation::EnterVisual => "enter_visual",
            Operation::EnterCommandLine => "enter_command_line",
            Operation::Exit => "exit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Built-in chord, in key notation
    pub fn default_chord(self) -> &'static str {
        match self {
            Operation::OpenParent => "h",
            Operation::OpenChild => "l",
            Operation::SelectNext => "j",
            Operation::SelectPrevious => "k",
            Operation::SelectFirst => "gg",
            Operation::SelectLast => "G",
            Operation::SelectHigh => "H",
            Operation::SelectMiddle => "M",
            Operation::SelectLow => "L",
            Operation::Delete => "D",
            Operation::Rename => "cw",
            Operation::Yank => "yy",
            Operation::Paste => "p",
            Operation::SearchNext => "n",
            Operation::EnterVisual => "v",
            Operation::EnterCommandLine => ":",
            Operation::Exit => "<C-q>",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_position() {
        for (i, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(op.index(), i, "{op} is out of order in Operation::ALL");
        }
    }

    #[test]
    fn test_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("launch_rockets"), None);
    }
}
