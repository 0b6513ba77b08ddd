use crate::entry::FileEntry;
use std::fs;
use std::path::Path;

/// Entries of `path`, directories first, then by case-insensitive name.
/// Unreadable children are skipped.
pub fn read_directory(path: &Path, show_hidden: bool) -> Result<Vec<FileEntry>, std::io::Error> {
    let mut entries: Vec<FileEntry> = fs::read_dir(path)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| show_hidden || !is_hidden(path))
        .filter_map(FileEntry::from_path)
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Index of the first entry after `start` (wrapping) whose name contains
/// `query`, ignoring case
pub fn find_next(entries: &[FileEntry], start: Option<usize>, query: &str) -> Option<usize> {
    if entries.is_empty() || query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    let first = start.map_or(0, |row| row + 1);
    (0..entries.len())
        .map(|offset| (first + offset) % entries.len())
        .find(|&row| entries[row].name.to_lowercase().contains(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sorting_and_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("A.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::create_dir(dir.path().join("zdir")).unwrap();

        let entries = read_directory(dir.path(), false).unwrap();
        assert_eq!(names(&entries), vec!["zdir", "A.txt", "b.txt"]);

        let entries = read_directory(dir.path(), true).unwrap();
        assert_eq!(names(&entries), vec!["zdir", ".hidden", "A.txt", "b.txt"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_directory(&dir.path().join("gone"), false).is_err());
    }

    #[test]
    fn test_find_next_wraps() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["alpha", "beta", "gamma", "Alpine"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let entries = read_directory(dir.path(), false).unwrap();
        // alpha, Alpine, beta, gamma
        assert_eq!(find_next(&entries, None, "AL"), Some(0));
        assert_eq!(find_next(&entries, Some(0), "al"), Some(1));
        assert_eq!(find_next(&entries, Some(1), "al"), Some(0));
        assert_eq!(find_next(&entries, Some(1), "zzz"), None);
        assert_eq!(find_next(&entries, Some(1), ""), None);
    }
}
