//! Template verification: turns a catalog entry into a checked [`Template`]

use super::catalog::TemplateLocation;
use super::manifest::{PromptSpec, TemplateDescriptor};
use super::source::TemplateSource;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// A verified template. The skeleton existed and a target path was declared
/// when it was built.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: String,
    pub description: Option<String>,
    pub template_path: PathBuf,
    pub target_path: String,
    pub prompts: Vec<PromptSpec>,
    pub additional_actions: Vec<String>,
}

/// Load, parse and check the descriptor behind `location`.
pub fn verify(location: &TemplateLocation, project_root: &Path) -> Result<Template> {
    let descriptor_path = match TemplateSource::parse(&location.target) {
        TemplateSource::Remote(url) => {
            return Err(ScaffoldError::UnsupportedSource {
                id: location.id.clone(),
                target: url.to_string(),
            })
        }
        TemplateSource::Local(path) => project_root.join(path),
    };

    tracing::debug!(
        template = %location.id,
        descriptor = %descriptor_path.display(),
        "loading template descriptor"
    );

    let content =
        std::fs::read_to_string(&descriptor_path).map_err(|e| ScaffoldError::Descriptor {
            path: descriptor_path.clone(),
            reason: e.to_string(),
        })?;
    let descriptor =
        TemplateDescriptor::from_yaml(&content).map_err(|e| ScaffoldError::Descriptor {
            path: descriptor_path.clone(),
            reason: e.to_string(),
        })?;

    let descriptor_dir = descriptor_path.parent().unwrap_or(Path::new(""));
    let template_path = project_root.join(descriptor_dir.join(&descriptor.template));

    if !template_path.exists() {
        return Err(ScaffoldError::MissingSkeleton {
            path: template_path,
        });
    }

    let target_path = match descriptor.target_path {
        Some(target) if !target.trim().is_empty() => target,
        _ => {
            return Err(ScaffoldError::MissingTargetPath {
                id: location.id.clone(),
            })
        }
    };

    Ok(Template {
        id: location.id.clone(),
        description: descriptor.description,
        template_path,
        target_path,
        prompts: descriptor.prompts,
        additional_actions: descriptor.additional_actions,
    })
}
