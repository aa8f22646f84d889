//! Charm-style CLI prompts using cliclack

use crate::config::{builtin_template_dir, Project, Values};
use crate::execute::{ExecutionOutcome, ExecutionReport, SkeletonExecutor, PARTIAL_FAILURE_GUIDANCE};
use crate::pipeline::{run_pipeline, PipelineOptions, Prompter};
use crate::prompts::{Question, QuestionKind};
use crate::templates::catalog::is_shadowed;
use crate::templates::TemplateLocation;
use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

/// CLI arguments for the new command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project root, discovered from the current directory when unset
    pub project_root: Option<PathBuf>,

    /// Bundled templates directory override
    pub template_dir: Option<PathBuf>,

    /// Template id to use without asking
    pub select: Option<String>,

    /// Pre-supplied answers (`key=value`)
    pub options: Vec<(String, String)>,

    pub base_version: Option<String>,

    pub private: Option<bool>,

    pub license: Option<String>,

    /// Keep temporary directories for debugging
    pub keep_temp: bool,
}

/// Prompter backed by cliclack
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn select_template(&mut self, catalog: &[TemplateLocation]) -> Result<usize> {
        if catalog.len() == 1 {
            cliclack::log::info(format!("Using template: {}", catalog[0].id))?;
            return Ok(0);
        }

        let mut select = cliclack::select("Select a template");
        for (idx, location) in catalog.iter().enumerate() {
            let hint = if is_shadowed(catalog, idx) {
                format!("{} (overridden)", location.target)
            } else {
                location.target.clone()
            };
            select = select.item(idx, &location.id, hint);
        }

        Ok(select.interact()?)
    }

    fn collect(&mut self, questions: &[Question]) -> Result<Values> {
        let mut answers = Values::new();

        for question in questions {
            let answer = match question.kind {
                QuestionKind::Confirm => {
                    let initial = question
                        .default
                        .as_ref()
                        .and_then(|d| d.as_bool())
                        .unwrap_or(false);
                    let value: bool = cliclack::confirm(&question.message)
                        .initial_value(initial)
                        .interact()?;
                    Value::Bool(value)
                }
                QuestionKind::Input => {
                    let validation = question.validation.clone();
                    let mut input = cliclack::input(&question.message)
                        .validate(move |value: &String| validation.check(value));
                    if let Some(default) = &question.default {
                        input = input.default_input(&default.as_text());
                    }
                    let value: String = input.interact()?;
                    Value::String(value.trim().to_string())
                }
            };
            answers.insert(question.name.clone(), answer);
        }

        Ok(answers)
    }
}

/// Run the scaffolding pipeline with interactive prompts.
/// Returns whether a package was created.
pub async fn run(args: CreateArgs) -> Result<bool> {
    cliclack::intro("skel new")?;

    let root = match &args.project_root {
        Some(root) => root.clone(),
        None => Project::discover(&std::env::current_dir()?),
    };
    let project = match Project::load(&root) {
        Ok(project) => project,
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            cliclack::outro_cancel("Could not load project configuration")?;
            return Ok(false);
        }
    };
    cliclack::log::info(format!("Project root: {}", project.root.display()))?;

    let options = PipelineOptions {
        select: args.select.clone(),
        preset: args
            .options
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
        base_version: args.base_version.clone(),
        private: args.private,
        license: args.license.clone(),
        builtin_root: builtin_template_dir(args.template_dir.clone()),
        keep_temporary_directories: args.keep_temp,
    };

    let executor = SkeletonExecutor::new();
    match run_pipeline(&project, &mut ClackPrompter, &executor, &options).await {
        Ok(report) => print_report(&report),
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            cliclack::outro_cancel("No changes were made")?;
            Ok(false)
        }
    }
}

fn print_report(report: &ExecutionReport) -> Result<bool> {
    if report.kept_temporary_directories {
        for dir in &report.temporary_directories {
            cliclack::log::remark(format!("Kept temporary directory {}", dir.display()))?;
        }
    }

    match &report.outcome {
        ExecutionOutcome::Succeeded { target_dir, .. } => {
            let lines = report.lines();
            cliclack::log::success(lines.join("\n"))?;
            println!();
            println!("  Next steps");
            println!();
            println!("  1.  cd {}", target_dir.display());
            cliclack::outro("Happy coding!")?;
            Ok(true)
        }
        ExecutionOutcome::Failed { message, partial } => {
            cliclack::log::error(message)?;
            if *partial {
                cliclack::log::warning(PARTIAL_FAILURE_GUIDANCE)?;
            }
            cliclack::outro_cancel("Package creation failed")?;
            Ok(false)
        }
    }
}
