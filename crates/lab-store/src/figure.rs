//! Figure encoding seam.

use std::path::Path;

use lab_core::errors::{ErrorInfo, LabError};

/// Format used by `save_figure` when the caller does not pick one.
pub const DEFAULT_FIGURE_FORMAT: &str = "png";

/// Rendering knobs forwarded to the figure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FigureOptions {
    /// Raster resolution; `None` leaves it to the backend.
    pub dpi: Option<u32>,
    /// Request a transparent background.
    pub transparent: bool,
}

/// Seam for plotting libraries: a figure that can encode itself.
pub trait Figure {
    /// Encodes the figure as `format` (`"png"`, `"svg"`, ...).
    ///
    /// Formats the backend cannot produce must yield
    /// [`LabError::UnsupportedFormat`].
    fn encode(&self, format: &str, options: &FigureOptions) -> Result<Vec<u8>, LabError>;
}

/// A figure already rendered to bytes by an external plotting library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFigure {
    format: String,
    bytes: Vec<u8>,
}

impl EncodedFigure {
    /// Wraps bytes already encoded as `format`.
    pub fn new(format: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            format: format.into(),
            bytes,
        }
    }

    /// Reads a rendered image, taking the format from the file extension.
    pub fn from_file(path: &Path) -> Result<Self, LabError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                LabError::UnsupportedFormat(
                    ErrorInfo::new("lab_store.figure_extension", "figure file has no extension")
                        .with_path(path),
                )
            })?
            .to_ascii_lowercase();
        let bytes = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => LabError::not_found("lab_store.figure_missing", path),
            _ => LabError::filesystem("lab_store.figure_read", path, err),
        })?;
        Ok(Self { format, bytes })
    }

    /// Format the bytes are encoded in.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Encoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Figure for EncodedFigure {
    fn encode(&self, format: &str, _options: &FigureOptions) -> Result<Vec<u8>, LabError> {
        if !self.format.eq_ignore_ascii_case(format) {
            return Err(LabError::UnsupportedFormat(
                ErrorInfo::new(
                    "lab_store.figure_format",
                    "pre-rendered figure cannot be converted",
                )
                .with_context("available", self.format.clone())
                .with_context("requested", format),
            ));
        }
        Ok(self.bytes.clone())
    }
}
