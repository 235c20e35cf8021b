//! Core types for braintrust-export

use serde::{Deserialize, Serialize};

/// A JSON object: the normalized shape of every remote payload
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A project on the tracking service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl Project {
    /// Create a project from an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// An experiment or dataset as returned by a list endpoint
///
/// Only the id and name are read from listings; the full object comes from the
/// per-resource retrieve call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl ResourceRef {
    /// Create a resource reference from an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The two parallel export pipelines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Experiments, with metadata, summary and an event log
    Experiment,
    /// Datasets, with metadata and records
    Dataset,
}

impl ResourceKind {
    /// Lowercase singular name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Experiment => "experiment",
            ResourceKind::Dataset => "dataset",
        }
    }

    /// Column holding the resource id in the aggregate table
    pub fn id_column(&self) -> &'static str {
        match self {
            ResourceKind::Experiment => "experiment_id",
            ResourceKind::Dataset => "dataset_id",
        }
    }

    /// Column holding the resource name in the aggregate table
    pub fn name_column(&self) -> &'static str {
        match self {
            ResourceKind::Experiment => "experiment_name",
            ResourceKind::Dataset => "dataset_name",
        }
    }

    /// Directory name under `CSV/`
    pub fn dir_name(&self) -> &'static str {
        match self {
            ResourceKind::Experiment => "Experiments",
            ResourceKind::Dataset => "Datasets",
        }
    }

    /// File name of the aggregate table
    pub fn aggregate_file_name(&self) -> &'static str {
        match self {
            ResourceKind::Experiment => "all_experiments.csv",
            ResourceKind::Dataset => "all_datasets.csv",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
