//! The minimal rule-driven build tool: a rule-file parser and a recursive
//! stat-then-run build driver.

mod build;
mod makefile;

pub use build::build_target;
pub use makefile::{Makefile, Rule};
