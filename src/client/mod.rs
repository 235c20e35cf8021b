//! Access to the experiment-tracking service
//!
//! [`ExperimentTracker`] is the seam between the exporter and the remote API.
//! [`HttpTracker`] talks to the Braintrust REST API; tests substitute an
//! in-memory implementation.

mod http;

pub use http::{ExperimentLog, HttpTracker};

use crate::error::Result;
use crate::types::{Project, ResourceRef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote operations the exporter needs
///
/// Every method performs its request(s) to completion before returning. The
/// exporter never calls two methods at once.
#[async_trait]
pub trait ExperimentTracker: Send + Sync {
    /// List every project visible to the credential
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// List the experiments of a project, in service order
    async fn list_experiments(&self, project_id: &str) -> Result<Vec<ResourceRef>>;

    /// Full experiment object (metadata)
    async fn retrieve_experiment(&self, experiment_id: &str) -> Result<Value>;

    /// Experiment summary (scores and metrics)
    async fn summarize_experiment(&self, experiment_id: &str) -> Result<Value>;

    /// Every event of an experiment's log
    ///
    /// The log is addressed by project and experiment *name*, the way a
    /// tracking session is opened.
    async fn fetch_experiment_events(
        &self,
        project_name: &str,
        experiment_name: &str,
    ) -> Result<Vec<Value>>;

    /// List the datasets of a project, in service order
    async fn list_datasets(&self, project_id: &str) -> Result<Vec<ResourceRef>>;

    /// Full dataset object (metadata)
    async fn retrieve_dataset(&self, dataset_id: &str) -> Result<Value>;

    /// A dataset's records, fetched in one call
    async fn fetch_dataset(&self, dataset_id: &str) -> Result<DatasetRecords>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// Response of a dataset fetch
///
/// `events` may be missing or null; both mean "no records".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecords {
    /// The dataset's records, if any were returned
    #[serde(default)]
    pub events: Option<Vec<Value>>,
}

impl DatasetRecords {
    /// The records, with a missing attribute read as empty
    pub fn into_events(self) -> Vec<Value> {
        self.events.unwrap_or_default()
    }
}

/// Body of every list endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub(crate) objects: Vec<Value>,
}

/// Body of a paginated event fetch
#[derive(Debug, Deserialize)]
pub(crate) struct FetchPage {
    #[serde(default)]
    pub(crate) events: Option<Vec<Value>>,
    #[serde(default)]
    pub(crate) cursor: Option<String>,
}
