// Blocking filesystem operations behind the desktop host
use crate::host::HostError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> HostError + '_ {
    move |e| HostError::from_io(path, e)
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// A bare file name; anything with a separator or `..` is refused
fn child_path(dir: &Path, name: &str) -> Result<PathBuf, HostError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', std::path::MAIN_SEPARATOR]);
    if !valid {
        return Err(HostError::Unsupported(format!("Invalid name '{}'", name)));
    }
    Ok(dir.join(name))
}

pub fn create_directory(dir: &Path, name: &str) -> Result<PathBuf, HostError> {
    let path = child_path(dir, name)?;
    fs::create_dir(&path).map_err(io_err(&path))?;
    info!("Created directory {}", path.display());
    Ok(path)
}

/// Create an empty file; an existing file is left alone and reported
pub fn create_file(dir: &Path, name: &str) -> Result<PathBuf, HostError> {
    let path = child_path(dir, name)?;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(io_err(&path))?;
    info!("Created file {}", path.display());
    Ok(path)
}

pub fn remove_entry(path: &Path, use_trash: bool) -> Result<(), HostError> {
    if !exists(path) {
        return Err(HostError::NotFound(path.to_path_buf()));
    }
    if use_trash {
        trash::delete(path).map_err(|e| HostError::Io {
            path: path.to_path_buf(),
            source: io::Error::other(e.to_string()),
        })?;
    } else if fs::symlink_metadata(path).map_err(io_err(path))?.is_dir() {
        fs::remove_dir_all(path).map_err(io_err(path))?;
    } else {
        fs::remove_file(path).map_err(io_err(path))?;
    }
    info!("Removed {} (trash: {})", path.display(), use_trash);
    Ok(())
}

/// Rename within the same directory. Never overwrites.
pub fn rename_entry(path: &Path, new_name: &str) -> Result<PathBuf, HostError> {
    let parent = path
        .parent()
        .ok_or_else(|| HostError::Unsupported(format!("Cannot rename {}", path.display())))?;
    let dest = child_path(parent, new_name)?;
    if !exists(path) {
        return Err(HostError::NotFound(path.to_path_buf()));
    }
    if exists(&dest) {
        return Err(HostError::AlreadyExists(dest));
    }
    fs::rename(path, &dest).map_err(io_err(path))?;
    info!("Renamed {} to {}", path.display(), dest.display());
    Ok(dest)
}

/// Copy a file or a whole directory to `dest_dir/dest_name`. Never overwrites.
pub fn copy_entry(source: &Path, dest_dir: &Path, dest_name: &str) -> Result<PathBuf, HostError> {
    let dest = child_path(dest_dir, dest_name)?;
    if !exists(source) {
        return Err(HostError::NotFound(source.to_path_buf()));
    }
    if exists(&dest) {
        return Err(HostError::AlreadyExists(dest));
    }

    if source.is_dir() {
        if dest.starts_with(source) {
            return Err(HostError::Unsupported(format!(
                "Cannot copy {} into itself",
                source.display()
            )));
        }
        copy_dir_recursive(source, &dest)?;
    } else {
        fs::copy(source, &dest).map_err(io_err(source))?;
    }
    info!("Copied {} to {}", source.display(), dest.display());
    Ok(dest)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), HostError> {
    fs::create_dir(dest).map_err(io_err(dest))?;

    for entry in fs::read_dir(src).map_err(io_err(src))? {
        let entry = entry.map_err(io_err(src))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if path.is_dir() {
            copy_dir_recursive(&path, &dest_path)?;
        } else {
            fs::copy(&path, &dest_path).map_err(io_err(&path))?;
        }
    }
    Ok(())
}

pub fn open_with_default(path: &Path) -> Result<(), HostError> {
    open::that(path).map_err(io_err(path))
}
