//! Answer validation

use crate::error::{Result, ScaffoldError};
use regex::Regex;
use std::sync::LazyLock;

static PLUGIN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("plugin id pattern is valid")
});

/// Named validators a template descriptor can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Lowercase letters and digits, separated by single dashes
    PluginId,
}

impl Validator {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "plugin-id" => Ok(Self::PluginId),
            other => Err(ScaffoldError::UnknownValidator(other.to_string())),
        }
    }

    pub fn check(&self, input: &str) -> std::result::Result<(), String> {
        match self {
            Self::PluginId => {
                if PLUGIN_ID.is_match(input) {
                    Ok(())
                } else {
                    Err("Must be lowercase letters and digits, separated by single dashes".into())
                }
            }
        }
    }
}

/// Validation attached to a question: non-empty first, then the optional rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    field: String,
    rule: Option<Validator>,
}

impl Validation {
    pub fn new(field: impl Into<String>, rule: Option<Validator>) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }

    pub fn rule(&self) -> Option<Validator> {
        self.rule
    }

    pub fn check(&self, input: &str) -> std::result::Result<(), String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(format!("Please enter a value for {}", self.field));
        }
        match &self.rule {
            Some(rule) => rule.check(input),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_id_rule() {
        let rule = Validator::PluginId;
        assert!(rule.check("my-plugin-2").is_ok());
        assert!(rule.check("a").is_ok());
        assert!(rule.check("My_Plugin").is_err());
        assert!(rule.check("double--dash").is_err());
        assert!(rule.check("-leading").is_err());
        assert!(rule.check("trailing-").is_err());
        assert!(rule.check("has space").is_err());
    }

    #[test]
    fn test_unknown_validator() {
        assert!(matches!(
            Validator::from_name("semver"),
            Err(ScaffoldError::UnknownValidator(name)) if name == "semver"
        ));
        assert_eq!(Validator::from_name("plugin-id").unwrap(), Validator::PluginId);
    }

    #[test]
    fn test_empty_always_rejected() {
        for rule in [None, Some(Validator::PluginId)] {
            let validation = Validation::new("owner", rule);
            let err = validation.check("").unwrap_err();
            assert!(err.contains("owner"));
            assert!(validation.check("   ").is_err());
        }
    }

    #[test]
    fn test_rule_runs_after_empty_check() {
        let validation = Validation::new("id", Some(Validator::PluginId));
        assert!(validation.check("my-plugin-2").is_ok());
        assert!(validation.check("My_Plugin").is_err());
        assert!(Validation::new("name", None).check("My_Plugin").is_ok());
    }
}
