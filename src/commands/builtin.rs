use super::{CommandError, CommandRegistry, RegistryError};
use crate::host::{Host, HostError};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

type Builtin = fn(&mut dyn Host, &[&str]) -> Result<(), CommandError>;

const BUILTINS: [(&str, Builtin); 5] = [
    ("cd", cd),
    ("touch", touch),
    ("open", open),
    ("mkdir", mkdir),
    ("colorscheme", colorscheme),
];

pub(super) fn register_all(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    for (name, handler) in BUILTINS {
        registry.register(name, handler)?;
    }
    Ok(())
}

/// `cd <path>`
fn cd(host: &mut dyn Host, tokens: &[&str]) -> Result<(), CommandError> {
    let [_, target] = tokens else {
        return Err(CommandError::InvalidSignature);
    };

    let path = resolve_path(&host.current_directory_path(), target);
    host.change_directory(&path).map_err(|e| match e {
        HostError::NotFound(_) => CommandError::TargetNotFound,
        other => {
            warn!("cd {} failed: {}", path.display(), other);
            CommandError::Unexpected
        }
    })
}

/// `touch <name>...`
fn touch(host: &mut dyn Host, tokens: &[&str]) -> Result<(), CommandError> {
    for_each_name(tokens, |name| host.create_empty_file(name))
}

/// `mkdir <name>...`
fn mkdir(host: &mut dyn Host, tokens: &[&str]) -> Result<(), CommandError> {
    for_each_name(tokens, |name| host.make_directory(name))
}

/// `open`, using the platform's default handler for the current entry
fn open(host: &mut dyn Host, tokens: &[&str]) -> Result<(), CommandError> {
    if tokens.len() != 1 {
        return Err(CommandError::InvalidSignature);
    }
    if let Some(path) = host.current_entry_path() {
        host.open_with_default_handler(&path)?;
    }
    Ok(())
}

/// `colorscheme <name>`. Unknown names are passed through unchecked.
fn colorscheme(host: &mut dyn Host, tokens: &[&str]) -> Result<(), CommandError> {
    let [_, name] = tokens else {
        return Err(CommandError::InvalidSignature);
    };
    host.set_color_scheme(name);
    Ok(())
}

/// Attempt every name even after a failure; report the first one
fn for_each_name<F>(tokens: &[&str], mut create: F) -> Result<(), CommandError>
where
    F: FnMut(&str) -> Result<(), HostError>,
{
    let names = tokens.get(1..).unwrap_or_default();
    if names.is_empty() {
        return Err(CommandError::InvalidSignature);
    }

    let mut first_error = None;
    for &name in names {
        if let Err(e) = create(name) {
            warn!("Could not create {}: {}", name, e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Join `target` onto `base` unless it is absolute, then fold `.` and `..`
/// without touching the filesystem
pub fn resolve_path(base: &Path, target: &str) -> PathBuf {
    let joined = base.join(target);
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if resolved.file_name().is_some() {
                    resolved.pop();
                }
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
