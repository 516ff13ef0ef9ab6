use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt as _;
use std::path::PathBuf;

/// Joins `base` and `name` inserting exactly one `/` between them.
///
/// A trailing `/` already present on `base` is preserved as-is (`name`
/// is appended directly, never doubled). Operates byte-wise, matching
/// the original `create_path`: no encoding is assumed or validated.
#[must_use]
pub fn join_path(base: &OsStr, name: &OsStr) -> PathBuf {
    let base_bytes = base.as_bytes();
    let name_bytes = name.as_bytes();

    let mut joined = Vec::with_capacity(base_bytes.len() + name_bytes.len() + 1);
    joined.extend_from_slice(base_bytes);
    if !base_bytes.ends_with(b"/") {
        joined.push(b'/');
    }
    joined.extend_from_slice(name_bytes);

    PathBuf::from(OsStr::from_bytes(&joined).to_os_string())
}

#[cfg(test)]
mod tests {
    use super::join_path;
    use std::ffi::OsStr;

    #[test]
    fn inserts_single_separator() {
        assert_eq!(join_path(OsStr::new("a"), OsStr::new("b")), std::path::Path::new("a/b"));
    }

    #[test]
    fn preserves_trailing_separator() {
        assert_eq!(join_path(OsStr::new("a/"), OsStr::new("b")), std::path::Path::new("a/b"));
    }

    #[test]
    fn handles_empty_base() {
        assert_eq!(join_path(OsStr::new(""), OsStr::new("b")), std::path::Path::new("/b"));
    }
}
