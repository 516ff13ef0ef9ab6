use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the `mdu` engine to its root driver.
///
/// Per-entry failures during traversal (a bad `lstat`, an unreadable
/// directory) are recovered inside the worker loop and folded into the
/// shared `error` flag instead of being returned as a value. Only the
/// setup-time failures below ever reach a caller directly.
#[derive(Debug)]
pub enum MduError {
    /// The root path itself could not be `lstat`'d.
    RootUnreadable { path: PathBuf, source: std::io::Error },
    /// Spawning worker thread number `index` failed.
    ThreadSpawn { index: usize, source: std::io::Error },
}

impl fmt::Display for MduError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootUnreadable { path, source } => {
                write!(f, "du: cannot access '{}': {source}", path.display())
            }
            Self::ThreadSpawn { index, source } => {
                write!(f, "mdu: failed to spawn worker {index}: {source}")
            }
        }
    }
}

impl std::error::Error for MduError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RootUnreadable { source, .. } | Self::ThreadSpawn { source, .. } => Some(source),
        }
    }
}

/// Errors surfaced by `mmake` while parsing a rule file or building a target.
#[derive(Debug)]
pub enum BuildError {
    /// The rule file could not be opened.
    OpenMakefile { path: PathBuf, source: std::io::Error },
    /// The rule file contains a line that does not parse as a rule.
    MalformedRule { line: usize, text: String },
    /// A command line inside a rule's recipe is empty.
    EmptyCommand { target: String, line: usize },
    /// No rule exists for `target` and no file of that name exists either.
    NoRuleForTarget { target: String },
    /// A target's recipe command could not even be spawned.
    CommandSpawn { target: String, source: std::io::Error },
    /// A target's recipe command ran but exited with a non-zero status.
    CommandFailed { target: String },
    /// No targets were requested and the makefile defines no rules at all.
    NoDefaultTarget,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenMakefile { path, source } => {
                write!(f, "mmake: {}: {source}", path.display())
            }
            Self::MalformedRule { line, text } => {
                write!(f, "mmake: malformed rule at line {line}: '{text}'")
            }
            Self::EmptyCommand { target, line } => {
                write!(f, "mmake: empty command line {line} in recipe for '{target}'")
            }
            Self::NoRuleForTarget { target } => {
                write!(f, "mmake: No rule to make target '{target}'")
            }
            Self::CommandSpawn { target, source } => {
                write!(f, "mmake: failed to run command for '{target}': {source}")
            }
            Self::CommandFailed { target } => {
                write!(f, "mmake: Command failed for target '{target}'")
            }
            Self::NoDefaultTarget => {
                write!(f, "mmake: makefile defines no rules")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenMakefile { source, .. } | Self::CommandSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}
