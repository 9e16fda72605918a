//! Deterministic path derivation for experiment folders.
//!
//! Every function here is pure: no existence checks and no normalisation.
//! Folder and artifact names are trusted to be valid single path segments.

use std::fmt;
use std::path::{Path, PathBuf};

use lab_core::DataRoot;
use serde::{Deserialize, Serialize};

/// Name of the data subdirectory.
pub const DATA_DIR: &str = "data";
/// Name of the figures subdirectory.
pub const FIGURES_DIR: &str = "figures";
/// Extension of config documents.
pub const CONFIG_EXTENSION: &str = "yml";

/// Which subdirectory an artifact lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Stored under `data/`.
    Data,
    /// Stored under `figures/`.
    Figure,
}

impl ArtifactKind {
    /// Subdirectory holding this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Data => DATA_DIR,
            ArtifactKind::Figure => FIGURES_DIR,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Paths of a single experiment folder under a [`DataRoot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentPaths {
    folder: PathBuf,
}

impl ExperimentPaths {
    /// Paths for `root/folder_name`.
    pub fn new(root: &DataRoot, folder_name: &str) -> Self {
        Self {
            folder: root.path().join(folder_name),
        }
    }

    /// `root/folder_name`
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// `root/folder_name/config_<version>.yml`
    pub fn config(&self, version: &str) -> PathBuf {
        self.folder.join(format!("config_{version}.{CONFIG_EXTENSION}"))
    }

    /// `root/folder_name/data`
    pub fn data_dir(&self) -> PathBuf {
        self.folder.join(DATA_DIR)
    }

    /// `root/folder_name/figures`
    pub fn figures_dir(&self) -> PathBuf {
        self.folder.join(FIGURES_DIR)
    }

    /// Directory for `kind`.
    pub fn dir(&self, kind: ArtifactKind) -> PathBuf {
        self.folder.join(kind.dir_name())
    }

    /// `<data|figures>/<version>_<name>.<format>`
    pub fn artifact(&self, kind: ArtifactKind, version: &str, name: &str, format: &str) -> PathBuf {
        self.dir(kind).join(artifact_file_name(version, name, format))
    }
}

/// File name of a versioned artifact.
pub fn artifact_file_name(version: &str, name: &str, format: &str) -> String {
    format!("{}{name}.{format}", version_prefix(version))
}

/// Prefix shared by every artifact file of `version`.
pub fn version_prefix(version: &str) -> String {
    format!("{version}_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> DataRoot {
        DataRoot::new("/tmp/root").unwrap()
    }

    #[test]
    fn layout_matches_convention() {
        let paths = ExperimentPaths::new(&root(), "exp1");
        assert_eq!(paths.folder(), Path::new("/tmp/root/exp1"));
        assert_eq!(paths.config("v1"), PathBuf::from("/tmp/root/exp1/config_v1.yml"));
        assert_eq!(paths.data_dir(), PathBuf::from("/tmp/root/exp1/data"));
        assert_eq!(paths.figures_dir(), PathBuf::from("/tmp/root/exp1/figures"));
        assert_eq!(
            paths.artifact(ArtifactKind::Figure, "v2", "plot", "svg"),
            PathBuf::from("/tmp/root/exp1/figures/v2_plot.svg")
        );
    }

    #[test]
    fn names_are_not_sanitised() {
        let paths = ExperimentPaths::new(&root(), "my simulation");
        assert_eq!(
            paths.artifact(ArtifactKind::Data, "v1", "a.b", "pkl"),
            PathBuf::from("/tmp/root/my simulation/data/v1_a.b.pkl")
        );
    }
}
