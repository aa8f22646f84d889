//! Template catalog: bundled defaults merged with project-declared templates

use crate::config::TemplatesConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bundled templates, in the order they are offered
pub const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("library", "library/template.yaml"),
    ("binary", "binary/template.yaml"),
    ("module", "module/template.yaml"),
];

/// A selectable catalog entry. `target` is resolved lazily by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLocation {
    pub id: String,
    pub target: String,
}

impl TemplateLocation {
    pub fn new(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
        }
    }
}

/// The bundled defaults with targets rooted at `builtin_root`
pub fn default_templates(builtin_root: &Path) -> Vec<TemplateLocation> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|(id, descriptor)| {
            TemplateLocation::new(*id, builtin_root.join(descriptor).to_string_lossy())
        })
        .collect()
}

/// Build the ordered catalog.
///
/// Defaults come first unless the project opts out with `defaults: false`;
/// project entries follow in declaration order and are never deduplicated.
pub fn build_catalog(config: Option<&TemplatesConfig>, builtin_root: &Path) -> Vec<TemplateLocation> {
    let include_defaults = config.and_then(|c| c.defaults).unwrap_or(true);

    let mut catalog = if include_defaults {
        default_templates(builtin_root)
    } else {
        Vec::new()
    };

    if let Some(config) = config {
        catalog.extend(config.templates.iter().cloned());
    }

    catalog
}

/// Find a template by id. A later entry shadows an earlier one with the same id.
pub fn select_template<'a>(catalog: &'a [TemplateLocation], id: &str) -> Option<&'a TemplateLocation> {
    catalog.iter().rev().find(|location| location.id == id)
}

/// Whether the entry at `index` is shadowed by a later entry with the same id
pub fn is_shadowed(catalog: &[TemplateLocation], index: usize) -> bool {
    match catalog.get(index) {
        Some(entry) => catalog[index + 1..].iter().any(|later| later.id == entry.id),
        None => false,
    }
}
