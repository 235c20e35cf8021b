//! Export pipeline
//!
//! For the selected project, each resource kind is exported in listing order:
//!
//! 1. Retrieve metadata (and, for experiments, a summary)
//! 2. Fetch the resource's events or records
//! 3. Write a detail CSV when there is at least one event
//! 4. Append one flattened row to the kind's aggregate table
//!
//! The aggregate table is written once the loop ends, even with no rows.
//! Failures of per-resource calls are logged and degrade that resource to
//! empty data; failures to list resources, or to write files, abort the run.

mod datasets;
mod experiments;

use crate::client::ExperimentTracker;
use crate::error::Result;
use crate::flatten::{Row, flatten, merge_into};
use crate::normalize::normalize;
use crate::select::{ProjectSelector, select_project};
use crate::table::Table;
use crate::types::{Project, Record, ResourceKind, ResourceRef};
use crate::utils::OutputLayout;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of exporting one resource kind
#[derive(Clone, Debug)]
pub struct KindReport {
    /// Which kind was exported
    pub kind: ResourceKind,
    /// Rows written to the aggregate table (one per listed resource)
    pub resources: usize,
    /// Detail CSVs written, in resource order
    pub detail_files: Vec<PathBuf>,
    /// Per-resource remote calls that failed and were replaced by empty data
    pub warnings: usize,
    /// Directory holding every CSV of this kind
    pub output_dir: PathBuf,
    /// Location of the aggregate table
    pub aggregate_path: PathBuf,
}

impl KindReport {
    fn new(kind: ResourceKind, layout: &OutputLayout) -> Self {
        Self {
            kind,
            resources: 0,
            detail_files: Vec::new(),
            warnings: 0,
            output_dir: layout.dir(kind).to_path_buf(),
            aggregate_path: layout.aggregate_path(kind),
        }
    }
}

/// Outcome of a full export run
#[derive(Clone, Debug)]
pub struct ExportReport {
    /// The project that was exported
    pub project: Project,
    /// Experiment export
    pub experiments: KindReport,
    /// Dataset export
    pub datasets: KindReport,
}

/// Exports the resources of one project into an [`OutputLayout`]
pub struct Exporter<'a, T: ExperimentTracker + ?Sized> {
    tracker: &'a T,
    layout: OutputLayout,
}

impl<'a, T: ExperimentTracker + ?Sized> Exporter<'a, T> {
    /// Create an exporter writing into an existing layout
    pub fn new(tracker: &'a T, layout: OutputLayout) -> Self {
        Self { tracker, layout }
    }

    /// Empty aggregate table for a kind, seeded with its id and name columns
    fn aggregate_table(kind: ResourceKind) -> Table {
        Table::with_columns([kind.id_column(), kind.name_column()])
    }

    /// Write a resource's detail CSV if it has any events
    fn write_detail(
        &self,
        kind: ResourceKind,
        resource: &ResourceRef,
        events: Vec<Value>,
    ) -> Result<Option<PathBuf>> {
        if events.is_empty() {
            return Ok(None);
        }

        let records: Vec<Record> = events.into_iter().map(normalize).collect();
        let path = self.layout.detail_path(kind, &resource.name, &resource.id);
        Table::from_records(&records).write_csv(&path)?;
        Ok(Some(path))
    }
}

/// Build an aggregate row: id and name, then each payload flattened in turn
///
/// Later payloads overwrite keys set by earlier ones.
pub fn aggregate_row<I>(kind: ResourceKind, resource: &ResourceRef, payloads: I) -> Row
where
    I: IntoIterator<Item = Value>,
{
    let mut row = Row::new();
    row.insert(kind.id_column().to_string(), Value::from(resource.id.clone()));
    row.insert(
        kind.name_column().to_string(),
        Value::from(resource.name.clone()),
    );
    for payload in payloads {
        merge_into(&mut row, flatten(&normalize(payload)));
    }
    row
}

/// Unwrap a per-resource call, logging a failure and substituting a default
fn or_degraded<V: Default>(
    result: Result<V>,
    kind: ResourceKind,
    resource: &ResourceRef,
    what: &str,
    report: &mut KindReport,
) -> V {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                error = %e,
                id = %resource.id,
                "Failed to fetch {} {} for {}, continuing without it",
                kind,
                what,
                resource.name
            );
            report.warnings += 1;
            V::default()
        }
    }
}

/// Create the output layout, select a project and export both resource kinds
///
/// Directories are created before any remote call so a bad output path fails
/// fast.
pub async fn run_export<T, S>(
    tracker: &T,
    selector: &mut S,
    output_dir: &Path,
) -> Result<ExportReport>
where
    T: ExperimentTracker + ?Sized,
    S: ProjectSelector + ?Sized,
{
    let layout = OutputLayout::create(output_dir)?;
    info!("Exporting with {} into {}", tracker.name(), output_dir.display());

    let project = select_project(tracker, selector).await?;

    let exporter = Exporter::new(tracker, layout);
    let experiments = exporter.export_experiments(&project).await?;
    let datasets = exporter.export_datasets(&project).await?;

    Ok(ExportReport {
        project,
        experiments,
        datasets,
    })
}
