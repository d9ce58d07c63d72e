pub mod batch;
pub mod cli;
pub mod error;
pub mod fingerprint;
pub mod locator;
pub mod logging;
pub mod report;
pub mod snapshot;

pub use batch::batch::{BatchConfig, SnapshotOutcome, process_snapshot, run_batch};
pub use error::SnapshotError;
pub use locator::locator_model::{Locator, LocatorStep};
pub use snapshot::snapshot_model::Node;
