use super::probe::{probe, Probe};
use super::state::{TraversalState, WorkItem};
use crate::util::join_path;
use std::path::{Path, PathBuf};

/// Runs the worker loop: repeatedly claim a directory, scan it, and
/// recurse into its subdirectories, until the traversal signals exit.
///
/// Every blocking wait happens inside [`TraversalState::acquire_work`];
/// everything else here, `read_dir` and per-entry `lstat`, is an ordinary
/// blocking filesystem call made *without* holding the state's lock, and
/// the popped path is exclusively owned by this worker for the duration.
pub fn run(state: &TraversalState) {
    loop {
        let path = match state.acquire_work() {
            WorkItem::Exit => return,
            WorkItem::Scan(path) => path,
        };
        scan_directory(state, &path);
    }
}

/// Workers may assume any popped path is a directory: the root driver only
/// ever constructs a `TraversalState` for directories, and non-directory
/// children are accounted for in place by [`handle_child`] rather than
/// ever being pushed back onto the queue.
fn scan_directory(state: &TraversalState, dir_path: &Path) {
    match probe(dir_path) {
        Probe::Unreadable(source) => {
            eprintln!("du: cannot read '{}': {source}", dir_path.display());
            state.mark_error();
            state.finish_directory();
            return;
        }
        Probe::Entry { blocks, .. } => state.add_blocks(blocks),
    }

    let entries = match std::fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(source) => {
            eprintln!("du: cannot read directory '{}': {source}", dir_path.display());
            state.mark_error();
            state.finish_directory();
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else {
            eprintln!("du: error reading an entry of '{}'", dir_path.display());
            state.mark_error();
            continue;
        };
        let child_path = join_path(dir_path.as_os_str(), &entry.file_name());
        handle_child(state, child_path);
    }

    state.finish_directory();
}

fn handle_child(state: &TraversalState, child_path: PathBuf) {
    match probe(&child_path) {
        Probe::Unreadable(source) => {
            eprintln!("du: cannot read '{}': {source}", child_path.display());
            state.mark_error();
        }
        Probe::Entry { is_dir: true, .. } => {
            if let Err(rejected) = state.push_child(child_path) {
                eprintln!("mdu: failed to add {} to queue", rejected.display());
                state.mark_error();
                state.finish_directory();
            }
        }
        Probe::Entry { blocks, is_dir: false } => {
            state.add_blocks(blocks);
        }
    }
}
