//! Template execution with partial-failure bookkeeping
//!
//! The orchestrator hands a fresh [`ExecutionContext`] to a
//! [`TemplateExecutor`]. The executor allocates scratch directories through the
//! context and calls [`ExecutionContext::mark_as_modified`] before touching the
//! real target. If it then fails, the failure is reported as partial and the
//! target is left alone: generated output may already be mixed with files the
//! user cares about.

pub mod skeleton;

use crate::config::Values;
use crate::options::OptionSet;
use crate::templates::Template;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use skeleton::SkeletonExecutor;

/// Guidance shown when execution failed after the target was modified
pub const PARTIAL_FAILURE_GUIDANCE: &str = "It seems that something went wrong while creating the package.\n\
     The changes that were made have been left intact, so you can continue manually,\n\
     or revert them and try again.";

/// Per-run state shared with the executor
#[derive(Debug)]
pub struct ExecutionContext {
    pub private: bool,
    pub default_version: String,
    pub license: String,
    pub is_mono_repo: bool,
    temporary_directories: Vec<TempDir>,
    modified: bool,
}

impl ExecutionContext {
    pub fn new(options: &OptionSet, is_mono_repo: bool) -> Self {
        Self {
            private: options.private,
            default_version: options.base_version.clone(),
            license: options.license.clone(),
            is_mono_repo,
            temporary_directories: Vec::new(),
            modified: false,
        }
    }

    /// Allocate a scratch directory. It is removed when the run ends unless
    /// the run was configured to keep temporary directories.
    pub fn create_temporary_directory(&mut self, name: &str) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(name)
            .tempdir()
            .with_context(|| format!("Failed to create temporary directory '{}'", name))?;
        let path = dir.path().to_path_buf();
        tracing::debug!(path = %path.display(), "allocated temporary directory");
        self.temporary_directories.push(dir);
        Ok(path)
    }

    /// Record that the target filesystem has been touched. Never resets.
    pub fn mark_as_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn temporary_directories(&self) -> Vec<&Path> {
        self.temporary_directories.iter().map(TempDir::path).collect()
    }

    /// Release scratch directories, or persist them when `keep` is set.
    /// Returns every allocated path.
    fn finish(self, keep: bool) -> Vec<PathBuf> {
        self.temporary_directories
            .into_iter()
            .map(|dir| {
                if keep {
                    let path = dir.keep();
                    tracing::info!(path = %path.display(), "kept temporary directory");
                    path
                } else {
                    let path = dir.path().to_path_buf();
                    if let Err(e) = dir.close() {
                        tracing::warn!(path = %path.display(), "failed to remove temporary directory: {}", e);
                    }
                    path
                }
            })
            .collect()
    }
}

/// What the executor renders and where
#[derive(Debug, Clone)]
pub struct TemplateTarget {
    pub target_dir: PathBuf,
    pub template_dir: PathBuf,
    /// Option values plus `name` and `pluginVersion`
    pub values: Values,
}

impl TemplateTarget {
    pub fn new(options: &OptionSet, template: &Template) -> Self {
        let mut values = options.values.clone();
        values.insert("name".into(), Value::String(options.id.clone()));
        values.insert(
            "pluginVersion".into(),
            Value::String(options.base_version.clone()),
        );
        Self {
            target_dir: options.target_dir.clone(),
            template_dir: template.template_path.clone(),
            values,
        }
    }
}

/// The step that turns a skeleton and a value set into files on disk
#[allow(async_fn_in_trait)]
pub trait TemplateExecutor {
    async fn execute(&self, ctx: &mut ExecutionContext, target: &TemplateTarget) -> Result<()>;
}

/// Settings for one execution run
#[derive(Debug, Clone, Default)]
pub struct ExecuteSettings {
    pub is_mono_repo: bool,
    /// Persist temporary directories instead of removing them
    pub keep_temporary_directories: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Succeeded {
        template_id: String,
        target_dir: PathBuf,
    },
    Failed {
        /// The executor's error, unchanged
        message: String,
        /// Whether the target was modified before the failure
        partial: bool,
    },
}

/// Result of one execution run
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub outcome: ExecutionOutcome,
    /// Every temporary directory allocated during the run
    pub temporary_directories: Vec<PathBuf>,
    pub kept_temporary_directories: bool,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Succeeded { .. })
    }

    /// Lines to show the user. A partial failure adds recovery guidance.
    pub fn lines(&self) -> Vec<String> {
        match &self.outcome {
            ExecutionOutcome::Succeeded {
                template_id,
                target_dir,
            } => vec![format!(
                "Successfully created {} in {}",
                template_id,
                target_dir.display()
            )],
            ExecutionOutcome::Failed { message, partial } => {
                let mut lines = vec![message.clone()];
                if *partial {
                    lines.extend(PARTIAL_FAILURE_GUIDANCE.lines().map(str::to_string));
                }
                lines
            }
        }
    }
}

/// Run `executor` once for `template` with `options`.
pub async fn execute<E: TemplateExecutor>(
    executor: &E,
    options: &OptionSet,
    template: &Template,
    settings: &ExecuteSettings,
) -> ExecutionReport {
    let mut ctx = ExecutionContext::new(options, settings.is_mono_repo);
    let target = TemplateTarget::new(options, template);

    tracing::info!(
        template = %template.id,
        target = %target.target_dir.display(),
        "executing template"
    );

    let outcome = match executor.execute(&mut ctx, &target).await {
        Ok(()) => ExecutionOutcome::Succeeded {
            template_id: template.id.clone(),
            target_dir: target.target_dir.clone(),
        },
        Err(e) => {
            let partial = ctx.is_modified();
            tracing::debug!(partial, "template execution failed: {:#}", e);
            ExecutionOutcome::Failed {
                message: format!("{:#}", e),
                partial,
            }
        }
    };

    let temporary_directories = ctx.finish(settings.keep_temporary_directories);

    ExecutionReport {
        outcome,
        temporary_directories,
        kept_temporary_directories: settings.keep_temporary_directories,
    }
}
