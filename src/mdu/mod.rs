//! The parallel disk-usage engine: a shared work queue, a worker pool, and
//! the pending-directory termination protocol that ties them together.

mod driver;
mod probe;
mod queue;
mod state;
mod worker;

pub use driver::{measure, run_roots, MeasureError, Measurement};
pub use probe::{probe, Probe};
pub use queue::PathQueue;
pub use state::{TraversalState, WorkItem};
