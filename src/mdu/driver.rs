use super::probe::{probe, Probe};
use super::state::TraversalState;
use super::worker;
use crate::error::MduError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// The outcome of measuring one root: its aggregate block total and
/// whether any per-entry error was observed while reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub blocks: u64,
    pub had_error: bool,
}

/// Why [`measure`] could not produce a [`Measurement`] at all (as opposed
/// to producing one with `had_error` set, which still has a number).
#[derive(Debug)]
pub enum MeasureError {
    /// The root itself could not be `lstat`'d.
    RootUnreadable(std::io::Error),
    /// A worker thread failed to spawn during setup.
    ThreadSpawn,
}

/// Measures `root`: its own block count if it's not a directory, or the
/// full parallel traversal total if it is.
///
/// This is the `mdu` core with printing and process exit status stripped
/// away, so callers (including tests) can check block-total aggregation
/// directly against a number.
pub fn measure(root: &Path, thread_count: usize) -> Result<Measurement, MeasureError> {
    let (blocks, is_dir) = match probe(root) {
        Probe::Unreadable(source) => return Err(MeasureError::RootUnreadable(source)),
        Probe::Entry { blocks, is_dir } => (blocks, is_dir),
    };

    if !is_dir {
        return Ok(Measurement { blocks, had_error: false });
    }

    let state = Arc::new(TraversalState::seeded(root.to_path_buf()));
    match spawn_workers(&state, thread_count) {
        Ok(handles) => {
            for handle in handles {
                let _ = handle.join();
            }
            Ok(Measurement { blocks: state.total(), had_error: state.had_error() })
        }
        Err(()) => Err(MeasureError::ThreadSpawn),
    }
}

/// Drives the whole `mdu` invocation: walks `roots` in order, printing one
/// `<blocks>\t<path>` line per root as it completes, and returns the
/// process exit status (`0` if every root completed cleanly).
#[must_use]
pub fn run_roots(roots: &[PathBuf], thread_count: usize) -> i32 {
    let mut exit_status = 0;
    for root in roots {
        match measure(root, thread_count) {
            Ok(Measurement { blocks, had_error }) => {
                println!("{blocks}\t{}", root.display());
                if had_error {
                    exit_status = 1;
                }
            }
            Err(MeasureError::RootUnreadable(source)) => {
                eprintln!("{}", MduError::RootUnreadable { path: root.to_path_buf(), source });
                exit_status = 1;
            }
            Err(MeasureError::ThreadSpawn) => {
                exit_status = 1;
            }
        }
    }
    exit_status
}

/// Spawns `thread_count` workers sharing `state`. If spawning worker `k`
/// fails, sets shutdown, joins workers `0..k`, and reports failure. The
/// caller tears the state down simply by letting it drop.
fn spawn_workers(
    state: &Arc<TraversalState>,
    thread_count: usize,
) -> Result<Vec<thread::JoinHandle<()>>, ()> {
    let mut handles = Vec::with_capacity(thread_count);
    for index in 0..thread_count {
        let worker_state = Arc::clone(state);
        match thread::Builder::new().spawn(move || worker::run(&worker_state)) {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                eprintln!("{}", MduError::ThreadSpawn { index, source });
                state.shutdown();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(());
            }
        }
    }
    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::{measure, run_roots};
    use std::fs;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("coursetools_mdu_driver_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn single_file_reports_its_own_blocks() {
        let dir = fixture("single_file");
        let file = dir.join("a");
        fs::write(&file, b"hello").unwrap();

        let expected = fs::symlink_metadata(&file).unwrap();
        use std::os::unix::fs::MetadataExt as _;
        let result = measure(&file, 1).unwrap();
        assert_eq!(result.blocks, expected.blocks());
        assert!(!result.had_error);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_total_matches_across_thread_counts() {
        let dir = fixture("thread_independence");
        for i in 0..50 {
            fs::write(dir.join(format!("f{i}")), b"x").unwrap();
        }
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("g"), b"y").unwrap();

        let single = measure(&dir, 1).unwrap();
        let parallel = measure(&dir, 8).unwrap();
        assert_eq!(single.blocks, parallel.blocks);
        assert!(!single.had_error);
        assert!(!parallel.had_error);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn nested_total_equals_parent_block_count_plus_children() {
        let dir = fixture("root_equivalence");
        let child_dir = dir.join("child");
        fs::create_dir_all(&child_dir).unwrap();
        fs::write(child_dir.join("leaf"), b"z").unwrap();

        let whole = measure(&dir, 4).unwrap();
        let child_only = measure(&child_dir, 4).unwrap();

        use std::os::unix::fs::MetadataExt as _;
        let dir_blocks = fs::symlink_metadata(&dir).unwrap().blocks();
        assert_eq!(whole.blocks, dir_blocks + child_only.blocks);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_root_is_reported_as_unreadable() {
        let missing = std::env::temp_dir().join("coursetools_mdu_driver_definitely_missing_xyz");
        let _ = fs::remove_file(&missing);
        assert!(matches!(measure(&missing, 1), Err(super::MeasureError::RootUnreadable(_))));
    }

    #[test]
    fn all_present_roots_exit_cleanly() {
        let base = fixture("all_present_multi_root");
        let a = base.join("a");
        let b = base.join("b");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();

        let status = run_roots(&[a, b], 1);
        assert_eq!(status, 0);

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn a_missing_root_fails_the_run_without_stopping_the_others() {
        let base = fixture("one_missing_multi_root");
        let a = base.join("a");
        let missing = base.join("does_not_exist");
        fs::write(&a, b"x").unwrap();
        let _ = fs::remove_file(&missing);

        let status = run_roots(&[a, missing], 1);
        assert_eq!(status, 1);

        let _ = fs::remove_dir_all(&base);
    }
}
