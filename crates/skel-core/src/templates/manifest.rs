//! Template descriptor types and parsing

use serde::{Deserialize, Serialize};

/// A prompt entry in a template descriptor
///
/// Either the name of a built-in prompt (`id`, `moduleid`) or a full
/// descriptor with its own message, type, validator and default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptSpec {
    Builtin(String),
    Custom(PromptDescriptor),
}

/// Fully configured prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDescriptor {
    /// Key the answer is stored under
    pub id: String,

    /// Message shown to the user
    pub prompt: String,

    /// Prompt type, `input` when omitted
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Name of a validator applied on top of the non-empty check
    #[serde(default)]
    pub validate: Option<String>,

    /// Template-authored default, overridden by project globals
    #[serde(default)]
    pub default: Option<PromptDefault>,
}

/// Default value offered for a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptDefault {
    Bool(bool),
    Text(String),
}

impl PromptDefault {
    /// Convert a project global into a prompt default.
    /// Numbers are offered as text, non-scalar values are ignored.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Number(n) => Some(Self::Text(n.to_string())),
            _ => None,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => parse_bool(s),
        }
    }
}

/// Lenient boolean parsing for values that arrive as text (globals, `--option`)
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Per-template descriptor (`template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    /// Skeleton directory, relative to the descriptor file
    pub template: String,

    /// Directory new packages are created under, relative to the project root
    #[serde(default)]
    pub target_path: Option<String>,

    /// Description of what the template provides
    #[serde(default)]
    pub description: Option<String>,

    /// Prompts asked before execution, in order
    #[serde(default)]
    pub prompts: Vec<PromptSpec>,

    /// Follow-up action identifiers, carried through untouched
    #[serde(default)]
    pub additional_actions: Vec<String>,
}

impl TemplateDescriptor {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_prompts() {
        let yaml = r#"
template: skeleton
targetPath: crates
description: A library crate
prompts:
  - id
  - id: license
    prompt: License
    default: Apache-2.0
  - id: publish
    prompt: Publish to the registry?
    type: confirm
    default: false
additionalActions:
  - install
"#;
        let descriptor = TemplateDescriptor::from_yaml(yaml).unwrap();
        assert_eq!(descriptor.template, "skeleton");
        assert_eq!(descriptor.target_path.as_deref(), Some("crates"));
        assert_eq!(descriptor.prompts.len(), 3);
        assert_eq!(descriptor.prompts[0], PromptSpec::Builtin("id".to_string()));

        match &descriptor.prompts[1] {
            PromptSpec::Custom(p) => {
                assert_eq!(p.id, "license");
                assert_eq!(p.kind, None);
                assert_eq!(p.default, Some(PromptDefault::Text("Apache-2.0".into())));
            }
            other => panic!("expected descriptor, got {:?}", other),
        }
        match &descriptor.prompts[2] {
            PromptSpec::Custom(p) => {
                assert_eq!(p.kind.as_deref(), Some("confirm"));
                assert_eq!(p.default, Some(PromptDefault::Bool(false)));
            }
            other => panic!("expected descriptor, got {:?}", other),
        }
        assert_eq!(descriptor.additional_actions, vec!["install"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let descriptor = TemplateDescriptor::from_yaml("template: ./skeleton\n").unwrap();
        assert!(descriptor.target_path.is_none());
        assert!(descriptor.prompts.is_empty());
        assert!(descriptor.additional_actions.is_empty());
    }

    #[test]
    fn test_missing_template_field_is_an_error() {
        assert!(TemplateDescriptor::from_yaml("targetPath: crates\n").is_err());
    }

    #[test]
    fn test_default_from_global_value() {
        let v = serde_json::json!("MIT");
        assert_eq!(
            PromptDefault::from_value(&v),
            Some(PromptDefault::Text("MIT".into()))
        );
        assert_eq!(
            PromptDefault::from_value(&serde_json::json!(3)),
            Some(PromptDefault::Text("3".into()))
        );
        assert_eq!(PromptDefault::from_value(&serde_json::json!([1])), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" no "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
