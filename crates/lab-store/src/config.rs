use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind as IoErrorKind;

use lab_core::errors::{ErrorInfo, LabError};
use lab_core::{DataRoot, DEFAULT_VERSION};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::paths::ExperimentPaths;
use crate::serde::{from_yaml_slice, to_yaml_string};

/// Key of the section handed to artifact operations.
pub const NOTEBOOK_SECTION: &str = "notebook";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Accepts any YAML scalar as a version tag, so `version: 2` reads as `"2"`.
fn version_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(<D::Error as serde::de::Error>::custom(format!(
            "version must be a scalar, found {}",
            value_kind(&other)
        ))),
    }
}

/// The `{name, version}` handle passed to every artifact operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// Experiment folder name.
    pub name: String,
    /// Artifact version tag.
    #[serde(default = "default_version", deserialize_with = "version_tag")]
    pub version: String,
}

impl NotebookConfig {
    /// Handle for `name` at the default version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
        }
    }

    /// Replaces the version tag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Nested configuration document with insertion-ordered keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Mapping);

impl ConfigDocument {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing mapping, keeping its key order.
    pub fn from_mapping(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Top-level entries in insertion order.
    pub fn mapping(&self) -> &Mapping {
        &self.0
    }

    /// Unwraps the document.
    pub fn into_mapping(self) -> Mapping {
        self.0
    }

    /// Top-level value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts or replaces `key`. A new key is appended after existing ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(Value::String(key.into()), value.into())
    }

    /// Returns the nested mapping stored under `key`, if any.
    pub fn section(&self, key: &str) -> Option<&Mapping> {
        self.0.get(key).and_then(Value::as_mapping)
    }

    /// Extracts the [`NotebookConfig`] from the `notebook` section.
    pub fn notebook(&self) -> Result<NotebookConfig, LabError> {
        let section = self.section(NOTEBOOK_SECTION).ok_or_else(|| {
            LabError::Parse(
                ErrorInfo::new("lab_store.notebook_missing", "config has no notebook section")
                    .with_hint("add `notebook: {name: <folder>, version: v1}`"),
            )
        })?;
        serde_yaml::from_value(Value::Mapping(section.clone())).map_err(|err| {
            LabError::Parse(
                ErrorInfo::new("lab_store.notebook_invalid", "notebook section is malformed")
                    .with_hint(err.to_string()),
            )
        })
    }

    /// Starter document for a freshly initialised folder.
    pub fn template(notebook: &NotebookConfig) -> Self {
        let mut notebook_section = Mapping::new();
        notebook_section.insert("name".into(), notebook.name.clone().into());
        notebook_section.insert("version".into(), notebook.version.clone().into());

        let mut simulation = Mapping::new();
        simulation.insert("start".into(), Value::from(0_i64));
        simulation.insert("stop".into(), Value::from(100_i64));
        simulation.insert("step".into(), Value::from(1000_i64));
        let mut exp = Mapping::new();
        exp.insert("model".into(), "model.xml".into());
        exp.insert("simulation".into(), Value::Mapping(simulation));

        let mut doc = Self::new();
        doc.insert(NOTEBOOK_SECTION, Value::Mapping(notebook_section));
        doc.insert("exp", Value::Mapping(exp));
        doc
    }
}

/// Loads `config_<version>.yml` from the experiment folder.
pub fn load_config(
    root: &DataRoot,
    folder_name: &str,
    version: &str,
) -> Result<ConfigDocument, LabError> {
    let path = ExperimentPaths::new(root, folder_name).config(version);
    let bytes = fs::read(&path).map_err(|err| match err.kind() {
        IoErrorKind::NotFound => LabError::not_found("lab_store.config_missing", &path),
        _ => LabError::filesystem("lab_store.config_read", &path, err),
    })?;
    let value: Value = from_yaml_slice(&bytes).map_err(|err| {
        LabError::Parse(
            ErrorInfo::new("lab_store.config_parse", "config is not valid YAML")
                .with_path(&path)
                .with_hint(err.info().message.clone()),
        )
    })?;
    match value {
        Value::Mapping(mapping) => {
            debug!(path = %path.display(), keys = mapping.len(), "loaded config");
            Ok(ConfigDocument(mapping))
        }
        other => Err(LabError::Parse(
            ErrorInfo::new("lab_store.config_shape", "config top level must be a mapping")
                .with_path(&path)
                .with_context("found", value_kind(&other)),
        )),
    }
}

/// Writes `document` to `config_<version>.yml`, replacing any previous file.
pub fn save_config(
    root: &DataRoot,
    folder_name: &str,
    document: &ConfigDocument,
    version: &str,
) -> Result<(), LabError> {
    let path = ExperimentPaths::new(root, folder_name).config(version);
    let yaml = to_yaml_string(document)?;
    fs::write(&path, yaml).map_err(|err| LabError::filesystem("lab_store.config_write", &path, err))?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

/// Renders a mapping as an indented `key: value` listing.
///
/// Nested mappings start on the following line, indented two more spaces.
pub fn render_config(mapping: &Mapping) -> String {
    let mut out = String::new();
    render_into(&mut out, mapping, 0);
    out
}

fn render_into(out: &mut String, mapping: &Mapping, indent: usize) {
    for (key, value) in mapping {
        let _ = write!(out, "{:indent$}{}:", "", inline(key));
        match value {
            Value::Mapping(nested) => {
                out.push('\n');
                render_into(out, nested, indent + 2);
            }
            other => {
                let _ = writeln!(out, " {}", inline(other));
            }
        }
    }
}

fn inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(inline).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(mapping) => {
            let parts: Vec<String> = mapping
                .iter()
                .map(|(key, value)| format!("{}: {}", inline(key), inline(value)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, inline(&tagged.value)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notebook_version_defaults_to_v1() {
        let doc: ConfigDocument = serde_yaml::from_str("notebook:\n  name: exp1\n").unwrap();
        assert_eq!(doc.notebook().unwrap(), NotebookConfig::new("exp1"));
    }

    #[test]
    fn notebook_version_accepts_scalars() {
        let doc: ConfigDocument =
            serde_yaml::from_str("notebook:\n  name: exp1\n  version: 2\n").unwrap();
        assert_eq!(doc.notebook().unwrap().version, "2");

        let doc: ConfigDocument =
            serde_yaml::from_str("notebook:\n  name: exp1\n  version: true\n").unwrap();
        assert_eq!(doc.notebook().unwrap().version, "true");
    }

    #[test]
    fn notebook_version_rejects_nested_values() {
        let doc: ConfigDocument =
            serde_yaml::from_str("notebook:\n  name: exp1\n  version: [1, 2]\n").unwrap();
        let err = doc.notebook().unwrap_err();
        assert_eq!(err.info().code, "lab_store.notebook_invalid");
    }

    #[test]
    fn mapping_conversions_keep_order() {
        let mut mapping = Mapping::new();
        mapping.insert("zeta".into(), 1_i64.into());
        mapping.insert("alpha".into(), 2_i64.into());
        let doc = ConfigDocument::from_mapping(mapping.clone());
        assert_eq!(doc.get("alpha"), Some(&Value::from(2_i64)));
        let keys: Vec<_> = doc.into_mapping().keys().filter_map(Value::as_str).map(str::to_string).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn notebook_section_is_required() {
        let doc: ConfigDocument = serde_yaml::from_str("exp:\n  model: m.xml\n").unwrap();
        let err = doc.notebook().unwrap_err();
        assert_eq!(err.info().code, "lab_store.notebook_missing");
    }

    #[test]
    fn render_nests_mappings() {
        let doc: ConfigDocument = serde_yaml::from_str(
            "notebook:\n  name: exp1\n  version: v2\nexp:\n  simulation:\n    start: 0\n  tags: [a, b]\n",
        )
        .unwrap();
        assert_eq!(
            render_config(doc.mapping()),
            "notebook:\n  name: exp1\n  version: v2\nexp:\n  simulation:\n    start: 0\n  tags: [a, b]\n"
        );
    }

    #[test]
    fn template_round_trips_notebook() {
        let notebook = NotebookConfig::new("exp1").with_version("v3");
        let doc = ConfigDocument::template(&notebook);
        assert_eq!(doc.notebook().unwrap(), notebook);
        let keys: Vec<_> = doc.mapping().keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["notebook", "exp"]);
    }
}
