//! Versioned config and artifact storage for experiment folders.
//!
//! ```text
//! <root>/<folder>/
//!   config_<version>.yml
//!   data/<version>_<name>.<pkl|csv>
//!   figures/<version>_<name>.<png|svg|...>
//! ```

#![deny(missing_docs)]

mod artifacts;
mod config;
mod figure;
mod layout;
pub mod paths;
mod prune;
pub mod serde;
mod table;

pub use artifacts::{
    artifact_path, list_artifacts, load_data, save_data, save_figure, DataFormat,
    DEFAULT_DATA_FORMAT,
};
pub use config::{
    load_config, render_config, save_config, ConfigDocument, NotebookConfig, NOTEBOOK_SECTION,
};
pub use figure::{EncodedFigure, Figure, FigureOptions, DEFAULT_FIGURE_FORMAT};
pub use layout::{initialize, initialize_with_template, InitOutcome};
pub use paths::{ArtifactKind, ExperimentPaths};
pub use prune::{clear, ClearReport, ClearSelection};
pub use table::{read_csv, write_csv, DataArtifact, DataOptions, Table, TabularExport, TimeSeries};

pub use lab_core::{DataRoot, ErrorKind, LabError};
