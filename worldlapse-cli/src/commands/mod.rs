//! CLI command implementations

mod config;
mod schedule;
mod snapshot;

pub use config::{config, ConfigArgs};
pub use schedule::{schedule, ScheduleArgs};
pub use snapshot::{snapshot, SnapshotArgs};
