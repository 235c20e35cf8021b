use super::{Exporter, KindReport, aggregate_row, or_degraded};
use crate::client::ExperimentTracker;
use crate::error::Result;
use crate::types::{Project, ResourceKind};
use crate::utils::short_id;
use tracing::info;

impl<T: ExperimentTracker + ?Sized> Exporter<'_, T> {
    /// Export every dataset of `project`
    ///
    /// Same shape as the experiment export without a summary: the aggregate
    /// row is `dataset_id`, `dataset_name` and the flattened metadata. Records
    /// come from a single fetch; a missing `events` attribute means none.
    pub async fn export_datasets(&self, project: &Project) -> Result<KindReport> {
        let kind = ResourceKind::Dataset;
        let datasets = self.tracker.list_datasets(&project.id).await?;
        let mut table = Self::aggregate_table(kind);
        let mut report = KindReport::new(kind, &self.layout);

        for dataset in &datasets {
            info!(
                "Processing dataset: {} ({})",
                dataset.name,
                short_id(&dataset.id)
            );

            let metadata = self.tracker.retrieve_dataset(&dataset.id).await;
            let metadata = or_degraded(metadata, kind, dataset, "metadata", &mut report);
            let records = self.tracker.fetch_dataset(&dataset.id).await;
            let events = or_degraded(records, kind, dataset, "records", &mut report).into_events();

            if let Some(path) = self.write_detail(kind, dataset, events)? {
                report.detail_files.push(path);
            }

            table.push(aggregate_row(kind, dataset, [metadata]));
        }

        table.write_csv(&report.aggregate_path)?;
        report.resources = table.len();
        info!(
            "Exported {} datasets ({} detail files) to {}",
            report.resources,
            report.detail_files.len(),
            report.aggregate_path.display()
        );
        Ok(report)
    }
}
