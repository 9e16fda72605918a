#![deny(missing_docs)]
#![doc = "Core error taxonomy and data-root handling for the lab artifact manager."]

pub mod errors;
mod root;

pub use errors::{ErrorInfo, ErrorKind, LabError};
pub use root::{DataRoot, DATA_PATH_ENV};

/// Version tag applied when a notebook config does not name one.
pub const DEFAULT_VERSION: &str = "v1";
