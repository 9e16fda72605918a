//! Structured error types shared across lab crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LabError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, formats, versions).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds the `path` context entry.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Discriminant of a [`LabError`], convenient for matching without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ErrorKind {
    Config,
    NotFound,
    Parse,
    UnsupportedFormat,
    UnsupportedOperation,
    Filesystem,
    Serde,
}

/// Canonical error type for the lab artifact manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LabError {
    /// The data root is unset or unusable.
    #[error("configuration error: {0}")]
    Config(ErrorInfo),
    /// A config or artifact file requested for loading does not exist.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// Config, CSV or binary content is malformed.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// The requested data or figure format is not implemented.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(ErrorInfo),
    /// The payload lacks the capability the requested format needs.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(ErrorInfo),
    /// Underlying I/O failure while creating, writing or deleting.
    #[error("filesystem error: {0}")]
    Filesystem(ErrorInfo),
    /// Encoding a value failed before anything reached the disk.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LabError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LabError::Config(info)
            | LabError::NotFound(info)
            | LabError::Parse(info)
            | LabError::UnsupportedFormat(info)
            | LabError::UnsupportedOperation(info)
            | LabError::Filesystem(info)
            | LabError::Serde(info) => info,
        }
    }

    /// Returns the variant without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabError::Config(_) => ErrorKind::Config,
            LabError::NotFound(_) => ErrorKind::NotFound,
            LabError::Parse(_) => ErrorKind::Parse,
            LabError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            LabError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            LabError::Filesystem(_) => ErrorKind::Filesystem,
            LabError::Serde(_) => ErrorKind::Serde,
        }
    }

    /// Wraps an I/O failure on `path` as a [`LabError::Filesystem`].
    pub fn filesystem(code: &str, path: &Path, err: impl ToString) -> Self {
        LabError::Filesystem(
            ErrorInfo::new(code, "filesystem operation failed")
                .with_path(path)
                .with_hint(err.to_string()),
        )
    }

    /// Reports a missing file as [`LabError::NotFound`].
    pub fn not_found(code: &str, path: &Path) -> Self {
        LabError::NotFound(ErrorInfo::new(code, "file does not exist").with_path(path))
    }
}
