// Capability surface the engine drives. The desktop shell implements it;
// tests use the recording fake in `testing`.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Unsupported(String),
}

impl HostError {
    /// Map an io error on `path` onto the variants the engine distinguishes
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => HostError::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => HostError::AlreadyExists(path.to_path_buf()),
            _ => HostError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

pub trait Host {
    // --- Navigation ---
    fn open_child_of_selection(&mut self);
    fn open_parent(&mut self);
    fn select_row(&mut self, row: usize);
    fn current_row(&self) -> Option<usize>;
    fn row_count(&self) -> usize;
    /// Whether `row` is currently on screen
    fn is_row_visible(&self, row: usize) -> bool;

    /// Move the selection by `delta` rows, clamped to the list.
    /// Without a current row the first row is selected.
    fn select_row_relative(&mut self, delta: isize) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let target = match self.current_row() {
            Some(row) => row.saturating_add_signed(delta).min(count - 1),
            None => 0,
        };
        self.select_row(target);
    }

    fn select_first(&mut self) {
        if self.row_count() > 0 {
            self.select_row(0);
        }
    }

    fn select_last(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.select_row(count - 1);
        }
    }

    // --- Entries ---
    fn current_entry_path(&self) -> Option<PathBuf>;
    fn current_directory_path(&self) -> PathBuf;

    // --- Mutation ---
    fn make_directory(&mut self, name: &str) -> Result<(), HostError>;
    fn create_empty_file(&mut self, name: &str) -> Result<(), HostError>;
    fn remove_entry(&mut self, path: &Path) -> Result<(), HostError>;
    fn rename_entry(&mut self, path: &Path, new_name: &str) -> Result<(), HostError>;
    fn copy_entry(&mut self, source: &Path, dest_dir: &Path, dest_name: &str) -> Result<(), HostError>;
    fn open_with_default_handler(&mut self, path: &Path) -> Result<(), HostError>;
    fn change_directory(&mut self, path: &Path) -> Result<(), HostError>;
    fn set_color_scheme(&mut self, name: &str);
    /// Ask the user a yes/no question; `true` means go ahead
    fn confirm(&mut self, question: &str) -> bool;
    fn request_exit(&mut self);

    // --- Selection ---
    fn set_multi_selection_enabled(&mut self, enabled: bool);
    fn is_multi_selection_enabled(&self) -> bool;

    // --- Status and focus ---
    /// Show `message` in the status bar; a timeout of 0 keeps it until replaced
    fn show_status(&mut self, message: &str, timeout_secs: u32);
    fn focus_line_input(&mut self, initial: &str);
    fn focus_main_view(&mut self);

    fn search_forward(&mut self, text: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::BTreeSet;
    use std::ops::Range;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum HostCall {
        OpenChild,
        OpenParent,
        SelectRow(usize),
        MakeDirectory(String),
        CreateEmptyFile(String),
        RemoveEntry(PathBuf),
        RenameEntry(PathBuf, String),
        CopyEntry(PathBuf, PathBuf, String),
        OpenWithDefault(PathBuf),
        ChangeDirectory(PathBuf),
        SetColorScheme(String),
        Confirm(String),
        RequestExit,
        SetMultiSelection(bool),
        ShowStatus(String, u32),
        FocusLineInput(String),
        FocusMainView,
        SearchForward(String),
    }

    impl HostCall {
        fn is_mutation(&self) -> bool {
            matches!(
                self,
                HostCall::MakeDirectory(_)
                    | HostCall::CreateEmptyFile(_)
                    | HostCall::RemoveEntry(_)
                    | HostCall::RenameEntry(..)
                    | HostCall::CopyEntry(..)
                    | HostCall::ChangeDirectory(_)
            )
        }
    }

    /// In-memory host that records every call. Rows are `entries` inside
    /// `current_dir`; `existing` is the set of paths that exist on "disk".
    pub struct RecordingHost {
        pub calls: Vec<HostCall>,
        pub entries: Vec<PathBuf>,
        pub current: Option<usize>,
        pub visible: Range<usize>,
        pub current_dir: PathBuf,
        pub directories: BTreeSet<PathBuf>,
        pub existing: BTreeSet<PathBuf>,
        pub multi_selection: bool,
        pub confirm_answer: bool,
        /// Make every mutation fail with a permission error
        pub fail_mutations: bool,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::with_entries("/home/user", &[])
        }

        /// Host showing `names` inside `dir`, first row selected, all visible
        pub fn with_entries(dir: &str, names: &[&str]) -> Self {
            let current_dir = PathBuf::from(dir);
            let entries: Vec<PathBuf> = names.iter().map(|n| current_dir.join(n)).collect();
            let mut existing: BTreeSet<PathBuf> = entries.iter().cloned().collect();
            existing.insert(current_dir.clone());
            let directories = [current_dir.clone()].into_iter().collect();
            Self {
                calls: Vec::new(),
                current: if entries.is_empty() { None } else { Some(0) },
                visible: 0..entries.len(),
                entries,
                current_dir,
                directories,
                existing,
                multi_selection: false,
                confirm_answer: true,
                fail_mutations: false,
            }
        }

        pub fn statuses(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    HostCall::ShowStatus(message, _) => Some(message.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn mutations(&self) -> Vec<&HostCall> {
            self.calls.iter().filter(|call| call.is_mutation()).collect()
        }

        fn check_failure(&self, path: &Path) -> Result<(), HostError> {
            if self.fail_mutations {
                return Err(HostError::Io {
                    path: path.to_path_buf(),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                });
            }
            Ok(())
        }

        fn create(&mut self, name: &str) -> Result<(), HostError> {
            let path = self.current_dir.join(name);
            self.check_failure(&path)?;
            if !self.existing.insert(path.clone()) {
                return Err(HostError::AlreadyExists(path));
            }
            Ok(())
        }
    }

    impl Host for RecordingHost {
        fn open_child_of_selection(&mut self) {
            self.calls.push(HostCall::OpenChild);
        }

        fn open_parent(&mut self) {
            self.calls.push(HostCall::OpenParent);
        }

        fn select_row(&mut self, row: usize) {
            self.calls.push(HostCall::SelectRow(row));
            self.current = Some(row);
        }

        fn current_row(&self) -> Option<usize> {
            self.current
        }

        fn row_count(&self) -> usize {
            self.entries.len()
        }

        fn is_row_visible(&self, row: usize) -> bool {
            self.visible.contains(&row)
        }

        fn current_entry_path(&self) -> Option<PathBuf> {
            self.current.and_then(|row| self.entries.get(row).cloned())
        }

        fn current_directory_path(&self) -> PathBuf {
            self.current_dir.clone()
        }

        fn make_directory(&mut self, name: &str) -> Result<(), HostError> {
            self.calls.push(HostCall::MakeDirectory(name.to_string()));
            self.create(name)
        }

        fn create_empty_file(&mut self, name: &str) -> Result<(), HostError> {
            self.calls.push(HostCall::CreateEmptyFile(name.to_string()));
            self.create(name)
        }

        fn remove_entry(&mut self, path: &Path) -> Result<(), HostError> {
            self.calls.push(HostCall::RemoveEntry(path.to_path_buf()));
            self.check_failure(path)?;
            if !self.existing.remove(path) {
                return Err(HostError::NotFound(path.to_path_buf()));
            }
            Ok(())
        }

        fn rename_entry(&mut self, path: &Path, new_name: &str) -> Result<(), HostError> {
            self.calls
                .push(HostCall::RenameEntry(path.to_path_buf(), new_name.to_string()));
            self.check_failure(path)?;
            let dest = path.with_file_name(new_name);
            if self.existing.contains(&dest) {
                return Err(HostError::AlreadyExists(dest));
            }
            if !self.existing.remove(path) {
                return Err(HostError::NotFound(path.to_path_buf()));
            }
            self.existing.insert(dest);
            Ok(())
        }

        fn copy_entry(&mut self, source: &Path, dest_dir: &Path, dest_name: &str) -> Result<(), HostError> {
            self.calls.push(HostCall::CopyEntry(
                source.to_path_buf(),
                dest_dir.to_path_buf(),
                dest_name.to_string(),
            ));
            let dest = dest_dir.join(dest_name);
            self.check_failure(&dest)?;
            if !self.existing.contains(source) {
                return Err(HostError::NotFound(source.to_path_buf()));
            }
            if !self.existing.insert(dest.clone()) {
                return Err(HostError::AlreadyExists(dest));
            }
            Ok(())
        }

        fn open_with_default_handler(&mut self, path: &Path) -> Result<(), HostError> {
            self.calls.push(HostCall::OpenWithDefault(path.to_path_buf()));
            Ok(())
        }

        fn change_directory(&mut self, path: &Path) -> Result<(), HostError> {
            self.calls.push(HostCall::ChangeDirectory(path.to_path_buf()));
            if !self.directories.contains(path) {
                return Err(HostError::NotFound(path.to_path_buf()));
            }
            self.current_dir = path.to_path_buf();
            Ok(())
        }

        fn set_color_scheme(&mut self, name: &str) {
            self.calls.push(HostCall::SetColorScheme(name.to_string()));
        }

        fn confirm(&mut self, question: &str) -> bool {
            self.calls.push(HostCall::Confirm(question.to_string()));
            self.confirm_answer
        }

        fn request_exit(&mut self) {
            self.calls.push(HostCall::RequestExit);
        }

        fn set_multi_selection_enabled(&mut self, enabled: bool) {
            self.calls.push(HostCall::SetMultiSelection(enabled));
            self.multi_selection = enabled;
        }

        fn is_multi_selection_enabled(&self) -> bool {
            self.multi_selection
        }

        fn show_status(&mut self, message: &str, timeout_secs: u32) {
            self.calls
                .push(HostCall::ShowStatus(message.to_string(), timeout_secs));
        }

        fn focus_line_input(&mut self, initial: &str) {
            self.calls.push(HostCall::FocusLineInput(initial.to_string()));
        }

        fn focus_main_view(&mut self) {
            self.calls.push(HostCall::FocusMainView);
        }

        fn search_forward(&mut self, text: &str) {
            self.calls.push(HostCall::SearchForward(text.to_string()));
        }
    }
}
