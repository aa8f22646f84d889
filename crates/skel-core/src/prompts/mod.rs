//! Prompt resolution
//!
//! Turns the prompt entries of a template descriptor into [`Question`]s ready
//! to be asked by a [`Prompter`](crate::pipeline::Prompter). Nothing here talks
//! to the terminal or the filesystem.

pub mod validate;

use crate::config::Values;
use crate::error::{Result, ScaffoldError};
use crate::templates::manifest::{PromptDefault, PromptDescriptor, PromptSpec};

pub use validate::{Validation, Validator};

/// How a question is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Single-line text input
    Input,
    /// Yes/no confirmation
    Confirm,
}

impl QuestionKind {
    fn from_name(prompt: &str, name: Option<&str>) -> Result<Self> {
        match name {
            None | Some("input") => Ok(Self::Input),
            Some("confirm") => Ok(Self::Confirm),
            Some(other) => Err(ScaffoldError::UnknownPromptType {
                prompt: prompt.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

/// A resolved, askable question
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Key the answer is stored under
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
    pub default: Option<PromptDefault>,
    pub validation: Validation,
}

impl Question {
    /// Validate a text answer. Confirm questions accept anything that parses as a boolean.
    pub fn check(&self, input: &str) -> std::result::Result<(), String> {
        match self.kind {
            QuestionKind::Input => self.validation.check(input),
            QuestionKind::Confirm => crate::templates::manifest::parse_bool(input)
                .map(|_| ())
                .ok_or_else(|| format!("Expected yes or no for {}", self.name)),
        }
    }
}

/// Prompts every template can ask for by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinPrompt {
    Id,
    ModuleId,
}

impl BuiltinPrompt {
    /// (descriptor name, builtin) table
    const TABLE: &'static [(&'static str, BuiltinPrompt)] =
        &[("id", BuiltinPrompt::Id), ("moduleid", BuiltinPrompt::ModuleId)];

    pub fn from_name(name: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, builtin)| *builtin)
            .ok_or_else(|| ScaffoldError::UnknownBuiltinPrompt(name.to_string()))
    }

    pub fn question(&self) -> Question {
        let (name, message) = match self {
            Self::Id => ("id", "Enter the ID of the package [required]"),
            Self::ModuleId => ("moduleId", "Enter the ID of the module [required]"),
        };
        Question {
            name: name.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Input,
            default: None,
            validation: Validation::new(name, Some(Validator::PluginId)),
        }
    }
}

/// Resolve prompt specs into questions, in order.
///
/// Defaults come from `globals` when the prompt id is present there, otherwise
/// from the descriptor.
pub fn resolve(specs: &[PromptSpec], globals: &Values) -> Result<Vec<Question>> {
    specs
        .iter()
        .map(|spec| match spec {
            PromptSpec::Builtin(name) => Ok(BuiltinPrompt::from_name(name)?.question()),
            PromptSpec::Custom(descriptor) => resolve_descriptor(descriptor, globals),
        })
        .collect()
}

fn resolve_descriptor(descriptor: &PromptDescriptor, globals: &Values) -> Result<Question> {
    let kind = QuestionKind::from_name(&descriptor.id, descriptor.kind.as_deref())?;
    let rule = descriptor
        .validate
        .as_deref()
        .map(Validator::from_name)
        .transpose()?;

    let default = globals
        .get(&descriptor.id)
        .and_then(PromptDefault::from_value)
        .or_else(|| descriptor.default.clone());

    Ok(Question {
        name: descriptor.id.clone(),
        message: descriptor.prompt.clone(),
        kind,
        default,
        validation: Validation::new(descriptor.id.clone(), rule),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom(id: &str, default: Option<&str>) -> PromptSpec {
        PromptSpec::Custom(PromptDescriptor {
            id: id.to_string(),
            prompt: format!("Enter {}", id),
            kind: None,
            validate: None,
            default: default.map(|d| PromptDefault::Text(d.to_string())),
        })
    }

    #[test]
    fn test_builtins() {
        let questions = resolve(
            &[PromptSpec::Builtin("id".into()), PromptSpec::Builtin("moduleid".into())],
            &Values::new(),
        )
        .unwrap();
        assert_eq!(questions[0].name, "id");
        assert_eq!(questions[1].name, "moduleId");
        assert_eq!(questions[0].validation.rule(), Some(Validator::PluginId));
        assert!(questions[0].check("My_Plugin").is_err());
    }

    #[test]
    fn test_unknown_builtin_is_an_error() {
        let err = resolve(&[PromptSpec::Builtin("owner".into())], &Values::new()).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownBuiltinPrompt(name) if name == "owner"));
    }

    #[test]
    fn test_globals_override_template_default() {
        let mut globals = Values::new();
        globals.insert("license".into(), json!("MIT"));

        let questions = resolve(&[custom("license", Some("Apache-2.0"))], &globals).unwrap();
        assert_eq!(questions[0].default, Some(PromptDefault::Text("MIT".into())));

        let questions = resolve(&[custom("license", Some("Apache-2.0"))], &Values::new()).unwrap();
        assert_eq!(
            questions[0].default,
            Some(PromptDefault::Text("Apache-2.0".into()))
        );
    }

    #[test]
    fn test_descriptor_defaults_to_input() {
        let questions = resolve(&[custom("owner", None)], &Values::new()).unwrap();
        assert_eq!(questions[0].kind, QuestionKind::Input);
        assert_eq!(questions[0].default, None);
        assert!(questions[0].check("").is_err());
        assert!(questions[0].check("Team_A").is_ok());
    }

    #[test]
    fn test_confirm_question() {
        let spec = PromptSpec::Custom(PromptDescriptor {
            id: "publish".into(),
            prompt: "Publish?".into(),
            kind: Some("confirm".into()),
            validate: None,
            default: Some(PromptDefault::Bool(true)),
        });
        let questions = resolve(&[spec], &Values::new()).unwrap();
        assert_eq!(questions[0].kind, QuestionKind::Confirm);
        assert!(questions[0].check("no").is_ok());
        assert!(questions[0].check("perhaps").is_err());
    }

    #[test]
    fn test_unknown_validator_and_type() {
        let spec = PromptSpec::Custom(PromptDescriptor {
            id: "owner".into(),
            prompt: "Owner".into(),
            kind: None,
            validate: Some("email".into()),
            default: None,
        });
        assert!(matches!(
            resolve(&[spec], &Values::new()),
            Err(ScaffoldError::UnknownValidator(_))
        ));

        let spec = PromptSpec::Custom(PromptDescriptor {
            id: "owner".into(),
            prompt: "Owner".into(),
            kind: Some("password".into()),
            validate: None,
            default: None,
        });
        assert!(matches!(
            resolve(&[spec], &Values::new()),
            Err(ScaffoldError::UnknownPromptType { .. })
        ));
    }
}
