//! The data root under which every experiment folder lives.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::{ErrorInfo, LabError};

/// Environment variable naming the data root.
pub const DATA_PATH_ENV: &str = "DATA_PATH";

/// Absolute base directory shared by all experiment folders.
///
/// The value is read-only for the store. Pass it explicitly to every
/// operation instead of looking it up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRoot(PathBuf);

impl DataRoot {
    /// Wraps `path`, rejecting empty and relative paths.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LabError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LabError::Config(
                ErrorInfo::new("lab_core.root_empty", "data root is empty")
                    .with_hint(format!("set {DATA_PATH_ENV} to an absolute directory")),
            ));
        }
        if !path.is_absolute() {
            return Err(LabError::Config(
                ErrorInfo::new("lab_core.root_relative", "data root must be absolute")
                    .with_path(&path),
            ));
        }
        Ok(Self(path))
    }

    /// Reads the data root from [`DATA_PATH_ENV`].
    pub fn from_env() -> Result<Self, LabError> {
        Self::from_var(env::var_os(DATA_PATH_ENV))
    }

    /// Builds the data root from an already-read environment value.
    pub fn from_var(value: Option<OsString>) -> Result<Self, LabError> {
        match value {
            Some(value) => Self::new(PathBuf::from(value)),
            None => Err(LabError::Config(
                ErrorInfo::new("lab_core.root_unset", "data root is not configured")
                    .with_context("variable", DATA_PATH_ENV)
                    .with_hint(format!("export {DATA_PATH_ENV}=/absolute/path")),
            )),
        }
    }

    /// Borrows the underlying directory.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for DataRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
