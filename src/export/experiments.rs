use super::{Exporter, KindReport, aggregate_row, or_degraded};
use crate::client::ExperimentTracker;
use crate::error::Result;
use crate::types::{Project, ResourceKind};
use crate::utils::short_id;
use tracing::{info, warn};

impl<T: ExperimentTracker + ?Sized> Exporter<'_, T> {
    /// Export every experiment of `project`
    ///
    /// Writes one detail CSV per experiment with events and
    /// `all_experiments.csv` with one row per listed experiment. The row holds
    /// `experiment_id` and `experiment_name`, then flattened metadata, then the
    /// flattened summary (summary keys win).
    pub async fn export_experiments(&self, project: &Project) -> Result<KindReport> {
        let kind = ResourceKind::Experiment;
        let experiments = self.tracker.list_experiments(&project.id).await?;
        let mut table = Self::aggregate_table(kind);
        let mut report = KindReport::new(kind, &self.layout);

        for experiment in &experiments {
            info!(
                "Processing experiment: {} ({})",
                experiment.name,
                short_id(&experiment.id)
            );

            let metadata = self.tracker.retrieve_experiment(&experiment.id).await;
            let metadata = or_degraded(metadata, kind, experiment, "metadata", &mut report);
            let summary = self.tracker.summarize_experiment(&experiment.id).await;
            let summary = or_degraded(summary, kind, experiment, "summary", &mut report);

            // One attempt; a failed fetch exports the experiment without events.
            let events = match self
                .tracker
                .fetch_experiment_events(&project.name, &experiment.name)
                .await
            {
                Ok(events) => events,
                Err(e) => {
                    warn!(
                        error = %e,
                        id = %experiment.id,
                        "Failed to fetch experiment events for {}",
                        experiment.name
                    );
                    report.warnings += 1;
                    Vec::new()
                }
            };

            if let Some(path) = self.write_detail(kind, experiment, events)? {
                report.detail_files.push(path);
            }

            table.push(aggregate_row(kind, experiment, [metadata, summary]));
        }

        table.write_csv(&report.aggregate_path)?;
        report.resources = table.len();
        info!(
            "Exported {} experiments ({} detail files) to {}",
            report.resources,
            report.detail_files.len(),
            report.aggregate_path.display()
        );
        Ok(report)
    }
}
