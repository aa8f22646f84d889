//! Default executor: renders a skeleton directory into the target directory

use super::{ExecutionContext, TemplateExecutor, TemplateTarget};
use crate::config::Values;
use anyhow::{Context, Result};
use handlebars::Handlebars;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Suffix marking skeleton files that are rendered rather than copied
const TEMPLATE_SUFFIX: &str = ".hbs";

/// Renders `*.hbs` files with handlebars (suffix stripped) and copies
/// everything else verbatim. Output is staged in a temporary directory and
/// only moved into the target once rendering succeeded.
pub struct SkeletonExecutor {
    handlebars: Handlebars<'static>,
}

impl SkeletonExecutor {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render the skeleton into `dest`, returning the written paths relative to `dest`
    pub async fn render_skeleton(
        &self,
        skeleton: &Path,
        dest: &Path,
        values: &Values,
    ) -> Result<Vec<PathBuf>> {
        if !skeleton.is_dir() {
            anyhow::bail!("Template skeleton is not a directory: {}", skeleton.display());
        }

        let mut written = Vec::new();

        for entry in WalkDir::new(skeleton).min_depth(1).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to read skeleton {}", skeleton.display()))?;
            let relative = entry.path().strip_prefix(skeleton)?;
            let relative = PathBuf::from(self.render_str(&relative.to_string_lossy(), values)?);

            if entry.file_type().is_dir() {
                fs::create_dir_all(dest.join(&relative))
                    .await
                    .with_context(|| format!("Failed to create directory: {}", relative.display()))?;
                continue;
            }

            let stripped = relative
                .to_str()
                .and_then(|s| s.strip_suffix(TEMPLATE_SUFFIX))
                .map(PathBuf::from);
            let render = stripped.is_some();
            let relative = stripped.unwrap_or(relative);

            let target_path = dest.join(&relative);
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            if render {
                let source = fs::read_to_string(entry.path())
                    .await
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                let content = self
                    .render_str(&source, values)
                    .with_context(|| format!("Failed to render {}", entry.path().display()))?;
                fs::write(&target_path, content)
                    .await
                    .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            } else {
                fs::copy(entry.path(), &target_path)
                    .await
                    .with_context(|| format!("Failed to copy file: {}", target_path.display()))?;
            }

            written.push(relative);
        }

        Ok(written)
    }

    fn render_str(&self, template: &str, values: &Values) -> Result<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        Ok(self.handlebars.render_template(template, values)?)
    }
}

impl Default for SkeletonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExecutor for SkeletonExecutor {
    async fn execute(&self, ctx: &mut ExecutionContext, target: &TemplateTarget) -> Result<()> {
        if fs::try_exists(&target.target_dir).await.unwrap_or(false) {
            anyhow::bail!(
                "Target directory already exists: {}",
                target.target_dir.display()
            );
        }

        let name = target
            .values
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("package");
        let staging = ctx.create_temporary_directory(&format!("{}-", name))?;

        let written = self
            .render_skeleton(&target.template_dir, &staging, &target.values)
            .await?;

        ctx.mark_as_modified();
        copy_tree(&staging, &target.target_dir).await?;

        tracing::info!(
            files = written.len(),
            target = %target.target_dir.display(),
            "rendered template"
        );

        Ok(())
    }
}

/// Copy a directory tree, creating `dest` and any missing parents
async fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .await
        .context("Failed to create target directory")?;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let target_path = dest.join(entry.path().strip_prefix(source)?);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
        } else {
            fs::copy(entry.path(), &target_path)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        }
    }

    Ok(())
}
