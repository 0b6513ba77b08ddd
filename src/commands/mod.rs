//! Named commands typed on the `:` line
//!
//! A submitted line is split on whitespace. The first token names the
//! command; the whole token list goes to its handler. Lookup is exact,
//! there is no prefix dispatch.

mod builtin;
mod completion;

pub use builtin::resolve_path;
pub use completion::CompletionCycler;

use crate::host::{Host, HostError};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub type CommandHandler = Box<dyn Fn(&mut dyn Host, &[&str]) -> Result<(), CommandError>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command '{0}' is already registered")]
    Duplicate(String),
    #[error("invalid command name '{0}'")]
    InvalidName(String),
}

/// Errors a command reports on the status bar
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid command signature")]
    InvalidSignature,
    #[error("Target directory does not exist")]
    TargetNotFound,
    #[error("Unexpected error")]
    Unexpected,
    #[error(transparent)]
    Host(#[from] HostError),
}

pub struct CommandRegistry {
    entries: Vec<(String, CommandHandler)>,
    status_timeout_secs: u32,
}

impl CommandRegistry {
    pub fn new(status_timeout_secs: u32) -> Self {
        Self {
            entries: Vec::new(),
            status_timeout_secs,
        }
    }

    /// Registry holding `cd`, `touch`, `open`, `mkdir` and `colorscheme`
    pub fn with_builtins(status_timeout_secs: u32) -> Result<Self, RegistryError> {
        let mut registry = Self::new(status_timeout_secs);
        builtin::register_all(&mut registry)?;
        Ok(registry)
    }

    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut dyn Host, &[&str]) -> Result<(), CommandError> + 'static,
    {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.contains(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.entries.push((name.to_string(), Box::new(handler)));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Command names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the command named by `tokens[0]`. Returns `false` when no
    /// command has that name. Handler errors go to the status bar.
    pub fn dispatch(&self, host: &mut dyn Host, tokens: &[&str]) -> bool {
        let Some(name) = tokens.first() else {
            return false;
        };
        let Some((_, handler)) = self.entries.iter().find(|(n, _)| n == name) else {
            return false;
        };

        debug!("Running command {:?}", tokens);
        if let Err(e) = handler(host, tokens) {
            debug!("Command '{}' failed: {}", name, e);
            host.show_status(&e.to_string(), self.status_timeout_secs);
        }
        true
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .field("status_timeout_secs", &self.status_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{HostCall, RecordingHost};
    use std::path::PathBuf;

    fn builtins() -> CommandRegistry {
        CommandRegistry::with_builtins(4).unwrap()
    }

    #[test]
    fn test_builtin_names_in_order() {
        let registry = builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["cd", "touch", "open", "mkdir", "colorscheme"]
        );
    }

    #[test]
    fn test_duplicate_and_invalid_names() {
        let mut registry = builtins();
        assert_eq!(
            registry.register("cd", |_, _| Ok(())),
            Err(RegistryError::Duplicate("cd".to_string()))
        );
        assert_eq!(
            registry.register("two words", |_, _| Ok(())),
            Err(RegistryError::InvalidName("two words".to_string()))
        );
        assert!(registry.register("", |_, _| Ok(())).is_err());
    }

    #[test]
    fn test_dispatch_miss() {
        let registry = builtins();
        let mut host = RecordingHost::new();
        assert!(!registry.dispatch(&mut host, &["c"]));
        assert!(!registry.dispatch(&mut host, &[]));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_mkdir_runs_in_order() {
        let registry = builtins();
        let mut host = RecordingHost::new();
        assert!(registry.dispatch(&mut host, &["mkdir", "a", "b"]));
        assert_eq!(
            host.calls,
            vec![
                HostCall::MakeDirectory("a".to_string()),
                HostCall::MakeDirectory("b".to_string())
            ]
        );
    }

    #[test]
    fn test_handler_error_is_reported() {
        let registry = builtins();
        let mut host = RecordingHost::new();
        assert!(registry.dispatch(&mut host, &["colorscheme"]));
        assert_eq!(
            host.calls,
            vec![HostCall::ShowStatus("Invalid command signature".to_string(), 4)]
        );
    }

    #[test]
    fn test_cd_missing_target() {
        let registry = builtins();
        let mut host = RecordingHost::with_entries("/home/user", &[]);
        registry.dispatch(&mut host, &["cd", "../x"]);

        assert_eq!(host.statuses(), vec!["Target directory does not exist"]);
        assert_eq!(host.current_dir, PathBuf::from("/home/user"));
    }

    #[test]
    fn test_custom_command() {
        let mut registry = CommandRegistry::new(2);
        registry
            .register("greet", |host, tokens| {
                host.show_status(&format!("hello {}", tokens.len()), 1);
                Ok(())
            })
            .unwrap();
        let mut host = RecordingHost::new();
        assert!(registry.dispatch(&mut host, &["greet", "a"]));
        assert_eq!(host.statuses(), vec!["hello 2"]);
    }
}
