use super::CommandRegistry;

/// Cycles through command names sharing a typed prefix, in registration
/// order, then back to the typed text itself.
#[derive(Clone, Debug, Default)]
pub struct CompletionCycler {
    typed: String,
    cursor: usize,
    active: bool,
}

impl CompletionCycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start cycling over `typed`. Lines with more than one word cannot be
    /// completed; the cycler then stays inactive and `false` is returned.
    pub fn begin(&mut self, typed: &str) -> bool {
        debug_assert!(!self.active, "completion started twice without reset");

        if typed.contains(char::is_whitespace) {
            self.reset();
            return false;
        }
        self.typed = typed.to_string();
        self.cursor = 0;
        self.active = true;
        true
    }

    /// Next candidate, or the typed text once the matches run out.
    /// `None` when the cycler is inactive.
    pub fn next(&mut self, registry: &CommandRegistry) -> Option<String> {
        if !self.active {
            return None;
        }

        while let Some(name) = registry.name_at(self.cursor) {
            self.cursor += 1;
            if name.starts_with(&self.typed) {
                return Some(name.to_string());
            }
        }
        self.cursor = 0;
        Some(self.typed.clone())
    }

    /// Forget the typed text; needed after any edit not made by the cycler
    pub fn reset(&mut self) {
        self.typed.clear();
        self.cursor = 0;
        self.active = false;
    }
}
