pub mod graph;
pub mod schedule;

use async_trait::async_trait;

use crate::error::Result;

pub use graph::{Marker, TaskGraph};
pub use schedule::{HOURLY, Schedule, run_once, serve};

/// A unit of work the scheduler can invoke. Implementations must be safe to
/// run again after a failure.
#[async_trait]
pub trait Task: Send + Sync {
    fn id(&self) -> &str;

    async fn run(&self) -> Result<()>;
}
