use crate::host::Host;

/// Remembers the last submitted search so `n` can replay it
#[derive(Clone, Debug, Default)]
pub struct SearchController {
    last: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Record `text` and search forward for it. Empty text is ignored and
    /// keeps the previous search.
    pub fn submit(&mut self, host: &mut dyn Host, text: &str) {
        if text.is_empty() {
            return;
        }
        self.last = Some(text.to_string());
        host.search_forward(text);
    }

    /// Search again for the last text, if any
    pub fn repeat(&self, host: &mut dyn Host) {
        if let Some(text) = &self.last {
            host.search_forward(text);
        }
    }
}
