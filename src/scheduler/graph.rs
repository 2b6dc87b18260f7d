use std::sync::Arc;

use async_trait::async_trait;
use tokio_retry::{Retry, strategy::FixedInterval};
use tracing::{error, info, warn};

use crate::{config::RetryConfig, error::Result};

use super::Task;

pub const STOCK_DAG_ID: &str = "stock_data_pipeline";
pub const STOCK_DAG_DESCRIPTION: &str = "A pipeline to fetch and store stock market data";
pub const STOCK_DAG_TAGS: [&str; 3] = ["stock", "data", "pipeline"];

/// No-op node used to mark the boundaries of a graph.
#[derive(Clone, Debug)]
pub struct Marker {
    id: String,
}

impl Marker {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait]
impl Task for Marker {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self) -> Result<()> {
        Ok(())
    }
}

/// A linear chain of tasks. A task that still fails after its retries stops
/// the chain; downstream tasks do not run.
pub struct TaskGraph {
    dag_id: String,
    description: String,
    tags: Vec<String>,
    tasks: Vec<Arc<dyn Task>>,
    retry: RetryConfig,
}

impl TaskGraph {
    pub fn new(dag_id: &str, description: &str, retry: RetryConfig) -> Self {
        Self {
            dag_id: dag_id.to_string(),
            description: description.to_string(),
            tags: Vec::new(),
            tasks: Vec::new(),
            retry,
        }
    }

    /// `start >> task >> end`, tagged the way the stock pipeline is.
    pub fn stock_data_pipeline(task: Arc<dyn Task>, retry: RetryConfig) -> Self {
        let mut graph = Self::new(STOCK_DAG_ID, STOCK_DAG_DESCRIPTION, retry)
            .then(Arc::new(Marker::new("start")))
            .then(task)
            .then(Arc::new(Marker::new("end")));
        graph.tags = STOCK_DAG_TAGS.iter().map(|tag| tag.to_string()).collect();
        graph
    }

    pub fn then(mut self, task: Arc<dyn Task>) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn dag_id(&self) -> &str {
        &self.dag_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.id()).collect()
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    pub async fn run(&self) -> Result<()> {
        info!(dag_id = %self.dag_id, "starting graph run");

        for task in &self.tasks {
            if let Err(err) = self.run_task(task.clone()).await {
                error!(
                    dag_id = %self.dag_id,
                    task_id = %task.id(),
                    "task failed, downstream tasks skipped: {}",
                    err
                );
                return Err(err);
            }
        }

        info!(dag_id = %self.dag_id, "graph run succeeded");
        Ok(())
    }

    async fn run_task(&self, task: Arc<dyn Task>) -> Result<()> {
        let strategy = FixedInterval::new(*self.retry.delay()).take(*self.retry.retries());
        let mut attempt = 0;

        Retry::start(strategy, || {
            attempt += 1;
            let task = task.clone();
            let attempt = attempt;
            async move {
                let result = task.run().await;
                if let Err(err) = &result {
                    warn!(task_id = %task.id(), attempt, "task attempt failed: {}", err);
                }
                result
            }
        })
        .await
    }
}
