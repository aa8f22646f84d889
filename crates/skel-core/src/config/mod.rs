//! Project configuration and project root discovery
//!
//! Configuration lives in the project's `package.json` under the `skel` key:
//!
//! ```json
//! {
//!   "skel": {
//!     "defaults": true,
//!     "templates": [{ "id": "service", "target": "./templates/service/template.yaml" }],
//!     "globals": { "license": "MIT", "private": true }
//!   }
//! }
//! ```

pub mod project;

use crate::templates::catalog::TemplateLocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use project::Project;

/// Environment variable overriding the bundled templates directory
pub const TEMPLATE_DIR_ENV: &str = "SKEL_TEMPLATE_DIR";

/// Bundled templates shipped with the workspace.
///
/// This is the source checkout's `templates/` directory, fixed at build time.
/// An installed binary run away from the checkout needs `--template-dir` or
/// `SKEL_TEMPLATE_DIR` to reach the bundled templates.
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Directory holding the bundled templates: explicit flag, then
/// `SKEL_TEMPLATE_DIR`, then the templates shipped with the workspace
pub fn builtin_template_dir(explicit: Option<PathBuf>) -> PathBuf {
    let dir = explicit
        .or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(BUNDLED_TEMPLATE_DIR));
    if !dir.is_dir() {
        tracing::warn!(
            dir = %dir.display(),
            "bundled templates directory not found, set {} or pass --template-dir",
            TEMPLATE_DIR_ENV
        );
    }
    dir
}

/// Key in `package.json` holding the scaffolding configuration
pub const CONFIG_KEY: &str = "skel";

/// Answers and computed values, keyed by prompt id
pub type Values = BTreeMap<String, serde_json::Value>;

/// The `skel` object of a project's `package.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Include the bundled templates (defaults to true)
    #[serde(default)]
    pub defaults: Option<bool>,

    /// Project-declared templates, appended after the defaults
    #[serde(default)]
    pub templates: Vec<TemplateLocation>,

    /// Project-wide answers that pre-fill template prompts
    #[serde(default)]
    pub globals: Values,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: TemplatesConfig = serde_json::from_value(serde_json::json!({
            "defaults": false,
            "templates": [{ "id": "svc", "target": "templates/svc/template.yaml" }],
            "globals": { "license": "MIT", "private": true }
        }))
        .unwrap();

        assert_eq!(config.defaults, Some(false));
        assert_eq!(config.templates[0].id, "svc");
        assert_eq!(config.globals["license"], "MIT");
        assert_eq!(config.globals["private"], true);
    }

    #[test]
    fn test_explicit_template_dir_wins() {
        let dir = builtin_template_dir(Some(PathBuf::from("/opt/skel/templates")));
        assert_eq!(dir, PathBuf::from("/opt/skel/templates"));
    }

    #[test]
    fn test_missing_template_dir_is_still_returned() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("not-installed");
        assert_eq!(builtin_template_dir(Some(missing.clone())), missing);
    }

    #[test]
    fn test_bundled_templates_exist() {
        let bundled = PathBuf::from(BUNDLED_TEMPLATE_DIR);
        assert!(bundled.join("library/template.yaml").is_file());
    }

    #[test]
    fn test_empty_config() {
        let config: TemplatesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TemplatesConfig::default());
    }
}
