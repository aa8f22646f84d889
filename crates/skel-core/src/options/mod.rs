//! Option assembly: globals, answers and computed fields merged into an [`OptionSet`]

pub mod version;

use crate::config::Values;
use crate::error::{Result, ScaffoldError};
use crate::templates::manifest::parse_bool;
use crate::templates::Template;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub use version::{resolve_base_version, DEFAULT_BASE_VERSION};

pub const DEFAULT_LICENSE: &str = "Apache-2.0";

/// Inputs to [`assemble`] that do not come from prompts
#[derive(Debug, Clone, Default)]
pub struct AssembleInput {
    pub project_root: PathBuf,
    /// Explicit base version, bypasses the monorepo lookup
    pub base_version: Option<String>,
    /// Explicit private flag, bypasses globals and answers
    pub private: Option<bool>,
    /// Monorepo version file, `<project_root>/lerna.json` when unset
    pub version_file: Option<PathBuf>,
}

/// Fully resolved options handed to execution
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    pub id: String,
    pub private: bool,
    pub base_version: String,
    pub license: String,
    pub target_dir: PathBuf,
    /// Every merged value, computed fields included
    pub values: Values,
}

/// Merge value layers left to right. Later layers win on key collisions.
pub fn merge_layers(layers: &[&Values]) -> Values {
    let mut merged = Values::new();
    for layer in layers {
        for (key, value) in layer.iter() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Build the option set for `template` from project globals and user answers.
pub fn assemble(
    answers: &Values,
    globals: &Values,
    template: &Template,
    input: &AssembleInput,
) -> Result<OptionSet> {
    let provided = merge_layers(&[globals, answers]);

    let id = match provided.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            return Err(ScaffoldError::MissingId {
                template: template.id.clone(),
            })
        }
    };

    let version_file = input
        .version_file
        .clone()
        .unwrap_or_else(|| input.project_root.join("lerna.json"));
    let base_version = resolve_base_version(input.base_version.as_deref(), &version_file);

    let license = match provided.get("license") {
        Some(Value::String(license)) if !license.is_empty() => license.clone(),
        _ => DEFAULT_LICENSE.to_string(),
    };

    let private = input
        .private
        .or_else(|| provided.get("private").and_then(value_as_bool))
        .unwrap_or(false);

    let target_dir = resolve_target_dir(&input.project_root, &template.target_path, &id)?;

    let mut computed = Values::new();
    computed.insert("id".into(), Value::String(id.clone()));
    computed.insert("private".into(), Value::Bool(private));
    computed.insert("baseVersion".into(), Value::String(base_version.clone()));
    computed.insert("license".into(), Value::String(license.clone()));
    computed.insert(
        "targetDir".into(),
        Value::String(target_dir.to_string_lossy().into_owned()),
    );

    Ok(OptionSet {
        id,
        private,
        base_version,
        license,
        target_dir,
        values: merge_layers(&[&provided, &computed]),
    })
}

/// `<project_root>/<target_path>/<id>`, made absolute against the working directory
pub fn resolve_target_dir(project_root: &Path, target_path: &str, id: &str) -> Result<PathBuf> {
    Ok(std::path::absolute(project_root.join(target_path).join(id))?)
}

fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}
