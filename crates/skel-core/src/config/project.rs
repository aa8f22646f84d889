//! Project root discovery and `package.json` loading

use super::{TemplatesConfig, Values, CONFIG_KEY};
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

const PACKAGE_JSON: &str = "package.json";
const LERNA_JSON: &str = "lerna.json";

/// The project new packages are scaffolded into
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing the project `package.json`
    pub root: PathBuf,

    /// The `skel` configuration object, if the project declares one
    pub config: Option<TemplatesConfig>,

    /// Whether the project is a workspace of several packages
    pub is_mono_repo: bool,
}

impl Project {
    /// Locate the project root starting from `start`.
    ///
    /// Walks upwards and prefers the nearest `package.json` that declares
    /// `workspaces`, falling back to the nearest `package.json` of any kind,
    /// then to `start` itself.
    pub fn discover(start: &Path) -> PathBuf {
        let mut nearest: Option<&Path> = None;

        for dir in start.ancestors() {
            let manifest = dir.join(PACKAGE_JSON);
            if !manifest.is_file() {
                continue;
            }
            if nearest.is_none() {
                nearest = Some(dir);
            }
            if read_json(&manifest).is_ok_and(|json| json.get("workspaces").is_some()) {
                return dir.to_path_buf();
            }
        }

        nearest.unwrap_or(start).to_path_buf()
    }

    /// Load the project rooted at `root`. A missing `package.json` is not an error.
    /// Relative roots are resolved against the working directory.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = std::path::absolute(root.into())?;
        let manifest_path = root.join(PACKAGE_JSON);

        let manifest = if manifest_path.is_file() {
            Some(read_json(&manifest_path).map_err(|e| ScaffoldError::Config {
                path: manifest_path.clone(),
                reason: e.to_string(),
            })?)
        } else {
            tracing::debug!(root = %root.display(), "no package.json found, using defaults");
            None
        };

        let config = match manifest.as_ref().and_then(|m| m.get(CONFIG_KEY)) {
            Some(value) => Some(
                serde_json::from_value::<TemplatesConfig>(value.clone()).map_err(|e| {
                    ScaffoldError::Config {
                        path: manifest_path.clone(),
                        reason: format!("'{}': {}", CONFIG_KEY, e),
                    }
                })?,
            ),
            None => None,
        };

        let is_mono_repo = root.join(LERNA_JSON).is_file()
            || manifest
                .as_ref()
                .is_some_and(|m| m.get("workspaces").is_some());

        Ok(Self {
            root,
            config,
            is_mono_repo,
        })
    }

    /// Project-wide prompt answers (empty when unconfigured)
    pub fn globals(&self) -> Values {
        self.config
            .as_ref()
            .map(|c| c.globals.clone())
            .unwrap_or_default()
    }

    /// Path of the monorepo version file
    pub fn version_file(&self) -> PathBuf {
        self.root.join(LERNA_JSON)
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
