use std::fs::Metadata;
use std::os::unix::fs::MetadataExt as _;
use std::path::Path;

/// The outcome of `lstat`-ing a single filesystem entry.
#[derive(Debug)]
pub enum Probe {
    /// The entry was statted successfully.
    Entry { blocks: u64, is_dir: bool },
    /// `lstat` failed; the entry is unreadable.
    Unreadable(std::io::Error),
}

/// Link-stats `path`, never following a trailing symlink.
///
/// Block count and directory-ness are read from the same [`Metadata`]
/// so they cannot disagree with each other.
#[must_use]
pub fn probe(path: &Path) -> Probe {
    match path.symlink_metadata() {
        Ok(meta) => Probe::Entry {
            blocks: block_count(&meta),
            is_dir: meta.is_dir(),
        },
        Err(source) => Probe::Unreadable(source),
    }
}

/// Raw block count in filesystem-defined units (typically 512 bytes);
/// no unit conversion is performed.
#[must_use]
fn block_count(meta: &Metadata) -> u64 {
    meta.blocks()
}

#[cfg(test)]
mod tests {
    use super::{probe, Probe};
    use std::fs;

    #[test]
    fn probes_a_regular_file() {
        let dir = std::env::temp_dir().join("coursetools_probe_test_file");
        fs::write(&dir, b"hello").unwrap();
        match probe(&dir) {
            Probe::Entry { is_dir, .. } => assert!(!is_dir),
            Probe::Unreadable(e) => panic!("unexpected error: {e}"),
        }
        let _ = fs::remove_file(&dir);
    }

    #[test]
    fn probes_a_directory() {
        let dir = std::env::temp_dir().join("coursetools_probe_test_dir");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        match probe(&dir) {
            Probe::Entry { is_dir, .. } => assert!(is_dir),
            Probe::Unreadable(e) => panic!("unexpected error: {e}"),
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reports_unreadable_for_missing_path() {
        let missing = std::env::temp_dir().join("coursetools_probe_definitely_missing_xyz");
        let _ = fs::remove_file(&missing);
        assert!(matches!(probe(&missing), Probe::Unreadable(_)));
    }
}
