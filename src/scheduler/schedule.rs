use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use super::TaskGraph;

// sec min hour day-of-month month day-of-week
pub const HOURLY: &str = "0 0 * * * *";

/// Cron cadence for a graph. Ticks missed while the process was down are not
/// replayed.
#[derive(Clone, Debug)]
pub struct Schedule {
    cron: String,
}

impl Schedule {
    pub fn new(cron: &str) -> Self {
        Self {
            cron: cron.trim().to_string(),
        }
    }

    pub fn hourly() -> Self {
        Self::new(HOURLY)
    }

    pub fn cron(&self) -> &str {
        &self.cron
    }

    pub fn job(&self, graph: Arc<TaskGraph>) -> Result<Job> {
        let job = Job::new_async(self.cron.as_str(), move |_uuid, _l| {
            let graph = graph.clone();
            Box::pin(async move {
                if let Err(err) = graph.run().await {
                    error!(dag_id = %graph.dag_id(), "scheduled run failed: {}", err);
                }
            })
        })?;

        Ok(job)
    }
}

pub async fn run_once(graph: &TaskGraph) -> Result<()> {
    graph.run().await?;
    Ok(())
}

/// Registers the graph and blocks until Ctrl-C.
pub async fn serve(graph: TaskGraph, schedule: Schedule) -> Result<()> {
    let graph = Arc::new(graph);
    let mut sched = JobScheduler::new().await?;

    sched.add(schedule.job(graph.clone())?).await?;
    sched.start().await?;

    info!(
        dag_id = %graph.dag_id(),
        cron = %schedule.cron(),
        "scheduler started"
    );

    tokio::signal::ctrl_c().await?;

    info!("shutting down scheduler");
    sched.shutdown().await?;

    Ok(())
}
