use std::fs;

use lab_core::errors::LabError;
use lab_core::DataRoot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::artifacts::versioned_files;
use crate::config::NotebookConfig;
use crate::paths::{ArtifactKind, ExperimentPaths};

/// Which artifact directories [`clear`] should sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSelection {
    /// Sweep `data/`.
    pub data: bool,
    /// Sweep `figures/`.
    pub figures: bool,
}

impl ClearSelection {
    /// Both directories.
    pub const ALL: Self = Self {
        data: true,
        figures: true,
    };

    /// True when neither directory is selected.
    pub fn is_empty(self) -> bool {
        !self.data && !self.figures
    }

    fn kinds(self) -> impl Iterator<Item = ArtifactKind> {
        [
            (self.data, ArtifactKind::Data),
            (self.figures, ArtifactKind::Figure),
        ]
        .into_iter()
        .filter_map(|(selected, kind)| selected.then_some(kind))
    }
}

impl Default for ClearSelection {
    fn default() -> Self {
        Self::ALL
    }
}

/// Number of files removed per directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearReport {
    /// Files removed from `data/`.
    pub data_removed: usize,
    /// Files removed from `figures/`.
    pub figures_removed: usize,
}

impl ClearReport {
    /// Files removed overall.
    pub fn total(&self) -> usize {
        self.data_removed + self.figures_removed
    }
}

/// Deletes every artifact whose file name starts with `<version>_`.
///
/// Files of other versions are never touched and a missing directory counts
/// as nothing to clear. Deletion is permanent. A failure stops the sweep,
/// leaving files not yet visited in place.
pub fn clear(
    root: &DataRoot,
    notebook: &NotebookConfig,
    selection: ClearSelection,
    verbose: bool,
) -> Result<ClearReport, LabError> {
    let mut report = ClearReport::default();
    if selection.is_empty() {
        if verbose {
            info!("no action taken, both data and figure flags are off");
        }
        return Ok(report);
    }
    let paths = ExperimentPaths::new(root, &notebook.name);
    for kind in selection.kinds() {
        let dir = paths.dir(kind);
        let files = versioned_files(&dir, &notebook.version)?;
        for file in &files {
            fs::remove_file(file)
                .map_err(|err| LabError::filesystem("lab_store.remove_artifact", file, err))?;
            debug!(path = %file.display(), "removed artifact");
        }
        match kind {
            ArtifactKind::Data => report.data_removed = files.len(),
            ArtifactKind::Figure => report.figures_removed = files.len(),
        }
        if verbose {
            info!(
                version = %notebook.version,
                dir = %dir.display(),
                removed = files.len(),
                "cleared {kind} files"
            );
        }
    }
    Ok(report)
}
