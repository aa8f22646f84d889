//! Template catalog, descriptors and verification
//!
//! This module provides:
//! - The catalog of selectable templates (bundled defaults + project entries)
//! - Template descriptor types (`template.yaml`)
//! - Source classification (local path vs remote URL)
//! - Verification of a selected template's on-disk contract

pub mod catalog;
pub mod manifest;
pub mod source;
pub mod verify;

pub use catalog::{build_catalog, default_templates, select_template, TemplateLocation};
pub use manifest::{PromptDefault, PromptDescriptor, PromptSpec, TemplateDescriptor};
pub use source::TemplateSource;
pub use verify::{verify, Template};
