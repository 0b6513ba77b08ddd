// Handlers behind each normal-mode operation
use super::ModalEngine;
use crate::host::{Host, HostError};
use crate::model::{LineHandler, Operation};
use std::path::Path;
use tracing::warn;

pub(super) type OperationHandler = fn(&mut ModalEngine, &mut dyn Host);

pub(super) fn handler_table() -> [OperationHandler; Operation::COUNT] {
    Operation::ALL.map(handler_for)
}

fn handler_for(operation: Operation) -> OperationHandler {
    match operation {
        Operation::OpenParent => |_, host| host.open_parent(),
        Operation::OpenChild => |_, host| host.open_child_of_selection(),
        Operation::SelectNext => |_, host| host.select_row_relative(1),
        Operation::SelectPrevious => |_, host| host.select_row_relative(-1),
        Operation::SelectFirst => |_, host| host.select_first(),
        Operation::SelectLast => |_, host| host.select_last(),
        Operation::SelectHigh => select_high,
        Operation::SelectMiddle => select_middle,
        Operation::SelectLow => select_low,
        Operation::Delete => delete,
        Operation::Rename => rename,
        Operation::Yank => yank,
        Operation::Paste => paste,
        Operation::SearchNext => |engine, host| engine.search.repeat(host),
        Operation::EnterVisual => |_, host| host.set_multi_selection_enabled(true),
        Operation::EnterCommandLine => |engine, host| {
            engine.enter_line(host, LineHandler::Command, "")
        },
        Operation::Exit => |_, host| host.request_exit(),
    }
}

/// First and last row of the on-screen block, found by scanning outward
/// from the current row (or from the first visible row when the current
/// one is scrolled away)
pub(super) fn visible_block(host: &dyn Host) -> Option<(usize, usize)> {
    let count = host.row_count();
    let anchor = match host.current_row() {
        Some(row) if row < count && host.is_row_visible(row) => row,
        _ => (0..count).find(|&row| host.is_row_visible(row))?,
    };

    let mut first = anchor;
    while first > 0 && host.is_row_visible(first - 1) {
        first -= 1;
    }
    let mut last = anchor;
    while last + 1 < count && host.is_row_visible(last + 1) {
        last += 1;
    }
    Some((first, last))
}

fn select_high(_: &mut ModalEngine, host: &mut dyn Host) {
    if let Some((first, _)) = visible_block(host) {
        host.select_row(first);
    }
}

fn select_middle(_: &mut ModalEngine, host: &mut dyn Host) {
    if let Some((first, last)) = visible_block(host) {
        host.select_row(first + (last - first) / 2);
    }
}

fn select_low(_: &mut ModalEngine, host: &mut dyn Host) {
    if let Some((_, last)) = visible_block(host) {
        host.select_row(last);
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn delete(engine: &mut ModalEngine, host: &mut dyn Host) {
    let Some(path) = host.current_entry_path() else {
        return;
    };
    let name = file_name(&path).unwrap_or_else(|| path.display().to_string());
    if !host.confirm(&format!("Do you want to remove?\n{}", name)) {
        return;
    }
    if let Err(e) = host.remove_entry(&path) {
        warn!("Remove failed: {}", e);
        engine.report(host, &format!("Remove failed: {}", e));
    }
}

fn rename(engine: &mut ModalEngine, host: &mut dyn Host) {
    let Some(target) = host.current_entry_path() else {
        return;
    };
    let name = file_name(&target).unwrap_or_default();
    engine.enter_line(host, LineHandler::Rename { target }, &name);
}

fn yank(engine: &mut ModalEngine, host: &mut dyn Host) {
    let Some(path) = host.current_entry_path() else {
        return;
    };
    let message = format!("Yanked {}", file_name(&path).unwrap_or_default());
    engine.clipboard.yank(path);
    engine.report(host, &message);
}

fn paste(engine: &mut ModalEngine, host: &mut dyn Host) {
    let Some(source) = engine.clipboard.path().map(Path::to_path_buf) else {
        return;
    };
    let Some(name) = file_name(&source) else {
        return;
    };

    let dest_dir = host.current_directory_path();
    match host.copy_entry(&source, &dest_dir, &name) {
        Ok(()) => {}
        Err(HostError::AlreadyExists(_)) => {
            // Persistent until the user picks a name or cancels
            host.show_status("Set a new name for the destination file", 0);
            engine.enter_line(host, LineHandler::ConflictRename { source }, &name);
        }
        Err(e) => engine.report_copy_error(host, &source, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;

    fn host_with_rows(rows: usize) -> RecordingHost {
        let names: Vec<String> = (0..rows).map(|i| format!("f{}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        RecordingHost::with_entries("/d", &names)
    }

    #[test]
    fn test_visible_block_around_current_row() {
        let mut host = host_with_rows(20);
        host.visible = 5..12;
        host.current = Some(8);
        assert_eq!(visible_block(&host), Some((5, 11)));
    }

    #[test]
    fn test_visible_block_when_current_row_scrolled_away() {
        let mut host = host_with_rows(20);
        host.visible = 10..15;
        host.current = Some(2);
        assert_eq!(visible_block(&host), Some((10, 14)));
    }

    #[test]
    fn test_visible_block_empty() {
        let mut host = host_with_rows(3);
        host.visible = 0..0;
        assert_eq!(visible_block(&host), None);
        assert_eq!(visible_block(&RecordingHost::new()), None);
    }

    #[test]
    fn test_table_covers_every_operation() {
        assert_eq!(handler_table().len(), Operation::COUNT);
    }
}
