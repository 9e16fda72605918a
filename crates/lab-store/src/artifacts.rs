//! Named, versioned data and figure artifacts.
//!
//! Files live at `<folder>/<data|figures>/<version>_<name>.<format>`. A save
//! overwrites the file at that exact path; nothing else is touched.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lab_core::errors::{ErrorInfo, LabError};
use lab_core::DataRoot;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::NotebookConfig;
use crate::figure::{Figure, FigureOptions};
use crate::layout::ensure_dir;
use crate::paths::{version_prefix, ArtifactKind, ExperimentPaths};
use crate::serde::{from_bytes, to_bytes};
use crate::table::{read_csv, write_csv, DataArtifact, DataOptions};

/// Format used by `save_data`/`load_data` when the caller does not pick one.
pub const DEFAULT_DATA_FORMAT: &str = "pkl";

/// Encodings implemented for data artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// Opaque binary encoding of any serde value.
    Pkl,
    /// Tabular text; needs a table view.
    Csv,
}

impl DataFormat {
    /// File extension, also the format string callers pass.
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Pkl => "pkl",
            DataFormat::Csv => "csv",
        }
    }
}

impl FromStr for DataFormat {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pkl" => Ok(DataFormat::Pkl),
            "csv" => Ok(DataFormat::Csv),
            other => Err(LabError::UnsupportedFormat(
                ErrorInfo::new("lab_store.data_format", "unsupported data format")
                    .with_context("format", other)
                    .with_hint("use 'pkl' or 'csv'"),
            )),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Resolves the on-disk path of an artifact without touching the disk.
pub fn artifact_path(
    root: &DataRoot,
    notebook: &NotebookConfig,
    kind: ArtifactKind,
    name: &str,
    format: &str,
) -> PathBuf {
    ExperimentPaths::new(root, &notebook.name).artifact(kind, &notebook.version, name, format)
}

/// Writes `figure` to `figures/<version>_<name>.<format>`.
pub fn save_figure<F: Figure + ?Sized>(
    root: &DataRoot,
    notebook: &NotebookConfig,
    figure: &F,
    name: &str,
    format: &str,
    options: &FigureOptions,
    verbose: bool,
) -> Result<PathBuf, LabError> {
    let bytes = figure.encode(format, options)?;
    let paths = ExperimentPaths::new(root, &notebook.name);
    ensure_dir(&paths.figures_dir())?;
    let path = paths.artifact(ArtifactKind::Figure, &notebook.version, name, format);
    fs::write(&path, bytes).map_err(|err| LabError::filesystem("lab_store.figure_write", &path, err))?;
    report(verbose, "figure saved", &path);
    Ok(path)
}

/// Writes `data` to `data/<version>_<name>.<format>`.
///
/// The format and, for CSV, the table view are checked before any directory
/// or file is created.
pub fn save_data<T: DataArtifact>(
    root: &DataRoot,
    notebook: &NotebookConfig,
    data: &T,
    name: &str,
    format: &str,
    options: &DataOptions,
    verbose: bool,
) -> Result<PathBuf, LabError> {
    let format: DataFormat = format.parse()?;
    let paths = ExperimentPaths::new(root, &notebook.name);
    let path = paths.artifact(
        ArtifactKind::Data,
        &notebook.version,
        name,
        format.extension(),
    );
    match format {
        DataFormat::Pkl => {
            let bytes = to_bytes(data)?;
            ensure_dir(&paths.data_dir())?;
            fs::write(&path, bytes)
                .map_err(|err| LabError::filesystem("lab_store.data_write", &path, err))?;
        }
        DataFormat::Csv => {
            let table = data.as_tabular().ok_or_else(|| {
                LabError::UnsupportedOperation(
                    ErrorInfo::new("lab_store.csv_export", "data has no table view for CSV")
                        .with_context("type", std::any::type_name::<T>())
                        .with_hint("save as 'pkl' instead"),
                )
            })?;
            ensure_dir(&paths.data_dir())?;
            let file = File::create(&path)
                .map_err(|err| LabError::filesystem("lab_store.data_write", &path, err))?;
            write_csv(table, BufWriter::new(file), options).map_err(|err| with_path(err, &path))?;
        }
    }
    report(verbose, "data saved", &path);
    Ok(path)
}

/// Reads `data/<version>_<name>.<format>` back.
///
/// CSV loads go through [`crate::Table`], so column types and any index
/// column are not guaranteed to survive the round trip.
pub fn load_data<T: DataArtifact>(
    root: &DataRoot,
    notebook: &NotebookConfig,
    name: &str,
    format: &str,
    options: &DataOptions,
    verbose: bool,
) -> Result<T, LabError> {
    let path = artifact_path(root, notebook, ArtifactKind::Data, name, format);
    let file = File::open(&path).map_err(|err| match err.kind() {
        IoErrorKind::NotFound => LabError::not_found("lab_store.data_missing", &path),
        _ => LabError::filesystem("lab_store.data_read", &path, err),
    })?;
    let data = match format.parse::<DataFormat>()? {
        DataFormat::Pkl => {
            let mut bytes = Vec::new();
            BufReader::new(file)
                .read_to_end(&mut bytes)
                .map_err(|err| LabError::filesystem("lab_store.data_read", &path, err))?;
            from_bytes(&bytes).map_err(|err| with_path(err, &path))?
        }
        DataFormat::Csv => {
            let table = read_csv(BufReader::new(file), options).map_err(|err| with_path(err, &path))?;
            T::from_table(table)?
        }
    };
    report(verbose, "data loaded", &path);
    Ok(data)
}

/// Lists the artifact files of the notebook's version, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_artifacts(
    root: &DataRoot,
    notebook: &NotebookConfig,
    kind: ArtifactKind,
) -> Result<Vec<PathBuf>, LabError> {
    let dir = ExperimentPaths::new(root, &notebook.name).dir(kind);
    versioned_files(&dir, &notebook.version)
}

/// Regular files and symlinks in `dir` whose name starts with `<version>_`.
///
/// Names are compared as raw bytes, so non-UTF-8 names still match.
pub(crate) fn versioned_files(dir: &Path, version: &str) -> Result<Vec<PathBuf>, LabError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let prefix = version_prefix(version);
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| LabError::filesystem("lab_store.list_dir", dir, err))?;
        let file_type = entry.file_type();
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }
        if entry
            .file_name()
            .as_encoded_bytes()
            .starts_with(prefix.as_bytes())
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn with_path(err: LabError, path: &Path) -> LabError {
    let path = path.display().to_string();
    match err {
        LabError::Parse(info) => LabError::Parse(info.with_context("path", path)),
        LabError::Filesystem(info) => LabError::Filesystem(info.with_context("path", path)),
        other => other,
    }
}

fn report(verbose: bool, message: &str, path: &Path) {
    if verbose {
        info!(path = %path.display(), "{message}");
    } else {
        debug!(path = %path.display(), "{message}");
    }
}
