//! # braintrust-export
//!
//! Exports the experiments and datasets of a Braintrust project into CSV files.
//!
//! ## Pipeline
//!
//! 1. Build an [`ExportConfig`] (API key, base URL, output directory)
//! 2. Select a project through a [`ProjectSelector`]
//! 3. For each experiment and dataset: retrieve metadata, fetch events, write a
//!    detail CSV when there are events, and add one row to the aggregate table
//! 4. Write `all_experiments.csv` and `all_datasets.csv`
//!
//! ```text
//! <output-dir>/CSV/Experiments/all_experiments.csv
//! <output-dir>/CSV/Experiments/<name>_<id[:8]>.csv
//! <output-dir>/CSV/Datasets/all_datasets.csv
//! <output-dir>/CSV/Datasets/<name>_<id[:8]>.csv
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use braintrust_export::{ExportConfig, HttpTracker, NamedSelector, run_export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::from_env()?;
//!     let tracker = HttpTracker::new(&config)?;
//!
//!     let mut selector = NamedSelector::new("My Project");
//!     let report = run_export(&tracker, &mut selector, &config.output_dir).await?;
//!
//!     println!("{} experiments exported", report.experiments.resources);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Remote API access
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export pipeline
pub mod export;
/// Nested record flattening
pub mod flatten;
/// Payload normalization
pub mod normalize;
/// Project selection
pub mod select;
/// CSV tables
pub mod table;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use client::{DatasetRecords, ExperimentTracker, HttpTracker};
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use export::{ExportReport, Exporter, KindReport, run_export};
pub use select::{ConsoleSelector, NamedSelector, ProjectSelector, select_project};
pub use table::Table;
pub use types::{Project, Record, ResourceKind, ResourceRef};
pub use utils::OutputLayout;
