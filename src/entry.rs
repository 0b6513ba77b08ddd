use bytesize::ByteSize;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// One row of a directory listing
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: SystemTime,
}

impl FileEntry {
    /// Read metadata for `path`. Broken symlinks are kept, with the
    /// link's own timestamp.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let link_meta = fs::symlink_metadata(&path).ok()?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        let target_meta = fs::metadata(&path).ok();

        Some(Self {
            is_dir: target_meta.as_ref().is_some_and(|m| m.is_dir()),
            is_symlink: link_meta.is_symlink(),
            size: target_meta.as_ref().map_or(0, |m| m.len()),
            modified: target_meta
                .as_ref()
                .and_then(|m| m.modified().ok())
                .or_else(|| link_meta.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH),
            path,
            name,
        })
    }

    pub fn icon(&self) -> &'static str {
        match (self.is_dir, self.is_symlink) {
            (true, _) => "📁",
            (false, true) => "🔗",
            (false, false) => "📄",
        }
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} →", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn size_label(&self) -> String {
        if self.is_dir {
            "-".to_string()
        } else {
            ByteSize(self.size).to_string()
        }
    }

    pub fn modified_label(&self) -> String {
        let datetime: DateTime<Local> = self.modified.into();
        datetime.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"hello").unwrap();

        let entry = FileEntry::from_path(file).unwrap();
        assert_eq!(entry.name, "a.txt");
        assert!(!entry.is_dir);
        assert_eq!(entry.size, 5);
        assert_eq!(entry.icon(), "📄");

        let entry = FileEntry::from_path(dir.path().to_path_buf()).unwrap();
        assert!(entry.is_dir);
        assert_eq!(entry.size_label(), "-");
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileEntry::from_path(dir.path().join("nope")).is_none());
    }
}
