//! Error types for template resolution and option assembly

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("unknown built-in prompt '{0}'")]
    UnknownBuiltinPrompt(String),

    #[error("unknown validator '{0}'")]
    UnknownValidator(String),

    #[error("unknown type '{kind}' for prompt '{prompt}'")]
    UnknownPromptType { prompt: String, kind: String },

    #[error("template '{id}' does not declare a targetPath")]
    MissingTargetPath { id: String },

    #[error("template '{template}' did not produce an 'id' value")]
    MissingId { template: String },

    #[error("failed to load template descriptor {path}: {reason}")]
    Descriptor { path: PathBuf, reason: String },

    #[error("invalid project configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("template skeleton not found: {path}")]
    MissingSkeleton { path: PathBuf },

    #[error("remote templates are not supported yet (template '{id}' points to {target})")]
    UnsupportedSource { id: String, target: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScaffoldError {
    /// Whether the error comes from a malformed project or template descriptor
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownBuiltinPrompt(_)
                | Self::UnknownValidator(_)
                | Self::UnknownPromptType { .. }
                | Self::MissingTargetPath { .. }
                | Self::MissingId { .. }
                | Self::Descriptor { .. }
                | Self::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Pipeline stage that produced a [`PipelineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Catalog,
    Verify,
    Prompt,
    Collect,
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Catalog => "template selection",
            Stage::Verify => "template verification",
            Stage::Prompt => "prompt resolution",
            Stage::Collect => "answer collection",
            Stage::Assemble => "option assembly",
        };
        f.write_str(name)
    }
}

/// A failure before execution started. Nothing on disk has been touched.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: anyhow::Error,
}

impl PipelineError {
    pub fn new(stage: Stage, source: impl Into<anyhow::Error>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The underlying scaffold error, if the failure came from the core
    pub fn scaffold_error(&self) -> Option<&ScaffoldError> {
        self.source.downcast_ref::<ScaffoldError>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ScaffoldError::UnknownValidator("x".into()).is_configuration());
        assert!(ScaffoldError::MissingTargetPath { id: "x".into() }.is_configuration());
        assert!(!ScaffoldError::MissingSkeleton {
            path: PathBuf::from("/nope")
        }
        .is_configuration());
        assert!(!ScaffoldError::UnsupportedSource {
            id: "x".into(),
            target: "https://example.com".into()
        }
        .is_configuration());
    }

    #[test]
    fn test_pipeline_error_names_stage() {
        let err = PipelineError::new(
            Stage::Verify,
            ScaffoldError::MissingTargetPath { id: "lib".into() },
        );
        let message = err.to_string();
        assert!(message.starts_with("template verification failed"));
        assert!(message.contains("'lib'"));
        assert!(matches!(
            err.scaffold_error(),
            Some(ScaffoldError::MissingTargetPath { .. })
        ));
    }
}
