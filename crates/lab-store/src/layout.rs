use std::fs;
use std::path::Path;

use lab_core::errors::LabError;
use lab_core::DataRoot;
use tracing::{debug, info};

use crate::config::{save_config, ConfigDocument, NotebookConfig};
use crate::paths::ExperimentPaths;

/// What [`initialize`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The folder skeleton was created.
    Created,
    /// The folder already existed and was left untouched.
    AlreadyExists,
}

/// Creates `root/folder_name` with its `data/` and `figures/` subfolders.
///
/// An existing folder is left as is, so repeated calls never fail or alter
/// its contents. Creation is not transactional: a crash between the three
/// `create_dir_all` calls leaves a partial skeleton behind.
pub fn initialize(
    root: &DataRoot,
    folder_name: &str,
    verbose: bool,
) -> Result<InitOutcome, LabError> {
    let paths = ExperimentPaths::new(root, folder_name);
    if paths.folder().exists() {
        if verbose {
            info!(folder = %paths.folder().display(), "folder already exists, no changes made");
        } else {
            debug!(folder = %paths.folder().display(), "folder already exists");
        }
        return Ok(InitOutcome::AlreadyExists);
    }
    ensure_dir(paths.folder())?;
    ensure_dir(&paths.data_dir())?;
    ensure_dir(&paths.figures_dir())?;
    if verbose {
        info!(folder = %paths.folder().display(), "created folder structure");
    } else {
        debug!(folder = %paths.folder().display(), "created folder structure");
    }
    Ok(InitOutcome::Created)
}

/// Like [`initialize`], then writes a starter `config_<version>.yml` unless
/// one already exists.
pub fn initialize_with_template(
    root: &DataRoot,
    notebook: &NotebookConfig,
    verbose: bool,
) -> Result<InitOutcome, LabError> {
    let outcome = initialize(root, &notebook.name, verbose)?;
    let config_path = ExperimentPaths::new(root, &notebook.name).config(&notebook.version);
    if config_path.exists() {
        debug!(path = %config_path.display(), "config present, template skipped");
        return Ok(outcome);
    }
    save_config(
        root,
        &notebook.name,
        &ConfigDocument::template(notebook),
        &notebook.version,
    )?;
    if verbose {
        info!(path = %config_path.display(), "wrote starter config");
    }
    Ok(outcome)
}

/// Creates `path` and its parents; an existing directory is fine.
pub(crate) fn ensure_dir(path: &Path) -> Result<(), LabError> {
    fs::create_dir_all(path).map_err(|err| LabError::filesystem("lab_store.create_dir", path, err))
}
