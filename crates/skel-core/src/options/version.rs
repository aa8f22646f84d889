//! Base version lookup for new packages

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use std::path::Path;

/// Version used when neither the caller nor the project provides one
pub const DEFAULT_BASE_VERSION: &str = "0.1.0";

#[derive(Debug, Deserialize)]
struct VersionFile {
    version: String,
}

/// Pick the version new packages start at.
///
/// An explicit version is used verbatim. Otherwise the monorepo version file
/// is consulted, and any problem reading it falls back to the default.
pub fn resolve_base_version(explicit: Option<&str>, version_file: &Path) -> String {
    if let Some(version) = explicit {
        return version.to_string();
    }

    match read_version_file(version_file) {
        Ok(version) => version,
        Err(e) => {
            tracing::debug!(
                file = %version_file.display(),
                "no usable monorepo version ({:#}), using {}",
                e,
                DEFAULT_BASE_VERSION
            );
            DEFAULT_BASE_VERSION.to_string()
        }
    }
}

/// The `version` field as written, provided it parses as semver
fn read_version_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: VersionFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    parse_version(&file.version)?;
    Ok(file.version)
}

/// Parse version string, tolerating a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_version_wins() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("lerna.json");
        std::fs::write(&file, r#"{"version": "2.3.0"}"#).unwrap();
        assert_eq!(resolve_base_version(Some("9.9.9-rc.1"), &file), "9.9.9-rc.1");
    }

    #[test]
    fn test_version_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("lerna.json");
        std::fs::write(&file, r#"{"version": "2.3.0", "npmClient": "yarn"}"#).unwrap();
        assert_eq!(resolve_base_version(None, &file), "2.3.0");
    }

    #[test]
    fn test_version_file_value_used_as_written() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("lerna.json");
        std::fs::write(&file, r#"{"version": "v2.3.0"}"#).unwrap();
        assert_eq!(resolve_base_version(None, &file), "v2.3.0");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            resolve_base_version(None, &tmp.path().join("lerna.json")),
            DEFAULT_BASE_VERSION
        );
    }

    #[test]
    fn test_unusable_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("lerna.json");

        for content in ["{ broken", r#"{"packages": []}"#, r#"{"version": "independent"}"#] {
            std::fs::write(&file, content).unwrap();
            assert_eq!(resolve_base_version(None, &file), "0.1.0");
        }
    }

    #[test]
    fn test_parse_version_strips_prefix() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parse_version("latest").is_err());
    }
}
