use std::path::{Path, PathBuf};

/// Yank buffer holding the entry that the next paste copies
#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    path: Option<PathBuf>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yank(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
