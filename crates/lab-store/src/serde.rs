//! YAML and `bincode` helpers that report failures as [`LabError`].

use lab_core::errors::{ErrorInfo, LabError};
use serde::{de::DeserializeOwned, Serialize};

fn encode_error(code: &str, err: impl ToString) -> LabError {
    LabError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn decode_error(code: &str, err: impl ToString) -> LabError {
    LabError::Parse(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value into YAML, keeping mapping insertion order.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, LabError> {
    serde_yaml::to_string(value).map_err(|err| encode_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
///
/// `serde_yaml` only builds data; tags are never resolved to code.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, LabError> {
    serde_yaml::from_slice(data).map_err(|err| decode_error("yaml_deserialize", err))
}

/// Serializes a value into an opaque `bincode` blob.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, LabError> {
    bincode::serialize(value).map_err(|err| encode_error("bincode_serialize", err))
}

/// Rehydrates a value from a `bincode` blob.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LabError> {
    bincode::deserialize(bytes).map_err(|err| decode_error("bincode_deserialize", err))
}
