//! Shared building blocks for the `mdu` and `mmake` binaries.

pub mod error;
pub mod mdu;
pub mod mmake;
mod util;

pub use error::{BuildError, MduError};
pub use util::join_path;
