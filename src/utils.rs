//! Utility functions for file naming and output paths

use crate::error::Result;
use crate::types::ResourceKind;
use std::path::{Path, PathBuf};

/// Maximum length, in characters, of a sanitized name
pub const MAX_SANITIZED_LEN: usize = 100;

/// Number of id characters appended to detail file names
pub const SHORT_ID_LEN: usize = 8;

/// Make a display name safe to use in a file name
///
/// Keeps letters, digits, spaces, hyphens and underscores, drops everything
/// else, turns spaces into underscores and truncates to
/// [`MAX_SANITIZED_LEN`] characters.
///
/// # Examples
///
/// ```
/// use braintrust_export::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Run A: v2/final"), "Run_A_v2final");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_SANITIZED_LEN)
        .collect()
}

/// First [`SHORT_ID_LEN`] characters of an id
///
/// Shorter ids are returned whole.
#[must_use]
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// File name of a resource's detail CSV: `<sanitized-name>_<id[:8]>.csv`
#[must_use]
pub fn detail_file_name(name: &str, id: &str) -> String {
    format!("{}_{}.csv", sanitize_filename(name), short_id(id))
}

/// Output directories for one export run
///
/// ```text
/// <base>/CSV/Experiments/
/// <base>/CSV/Datasets/
/// ```
#[derive(Clone, Debug)]
pub struct OutputLayout {
    experiments_dir: PathBuf,
    datasets_dir: PathBuf,
}

impl OutputLayout {
    /// Compute the layout under `base` without touching the filesystem
    pub fn new(base: &Path) -> Self {
        let csv_root = base.join("CSV");
        Self {
            experiments_dir: csv_root.join(ResourceKind::Experiment.dir_name()),
            datasets_dir: csv_root.join(ResourceKind::Dataset.dir_name()),
        }
    }

    /// Compute the layout under `base` and create both directories
    ///
    /// Existing directories are reused.
    pub fn create(base: &Path) -> Result<Self> {
        let layout = Self::new(base);
        std::fs::create_dir_all(&layout.experiments_dir)?;
        std::fs::create_dir_all(&layout.datasets_dir)?;
        Ok(layout)
    }

    /// Directory holding files of the given kind
    pub fn dir(&self, kind: ResourceKind) -> &Path {
        match kind {
            ResourceKind::Experiment => &self.experiments_dir,
            ResourceKind::Dataset => &self.datasets_dir,
        }
    }

    /// Path of the aggregate table for a kind
    pub fn aggregate_path(&self, kind: ResourceKind) -> PathBuf {
        self.dir(kind).join(kind.aggregate_file_name())
    }

    /// Path of a resource's detail CSV
    pub fn detail_path(&self, kind: ResourceKind, name: &str, id: &str) -> PathBuf {
        self.dir(kind).join(detail_file_name(name, id))
    }
}
