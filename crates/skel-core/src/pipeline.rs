//! End-to-end scaffolding pipeline
//!
//! catalog → verify → resolve prompts → collect answers → assemble → execute.
//! Every stage before execution aborts with a [`PipelineError`] naming the
//! stage; nothing has been written at that point.

use crate::config::{Project, Values};
use crate::error::{PipelineError, Stage};
use crate::execute::{execute, ExecuteSettings, ExecutionReport, TemplateExecutor};
use crate::options::{assemble, AssembleInput};
use crate::prompts::{resolve, Question, QuestionKind};
use crate::templates::manifest::parse_bool;
use crate::templates::{build_catalog, select_template, verify, TemplateLocation};
use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

/// The interactive side of the pipeline
pub trait Prompter {
    /// Pick a template, returning its index in `catalog`
    fn select_template(&mut self, catalog: &[TemplateLocation]) -> Result<usize>;

    /// Ask `questions` in order and return the answers keyed by question name
    fn collect(&mut self, questions: &[Question]) -> Result<Values>;
}

/// Caller-supplied settings for one run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Template id to use instead of asking
    pub select: Option<String>,
    /// Answers supplied up front; matching questions are not asked
    pub preset: Values,
    pub base_version: Option<String>,
    pub private: Option<bool>,
    pub license: Option<String>,
    /// Directory holding the bundled templates
    pub builtin_root: PathBuf,
    pub keep_temporary_directories: bool,
}

/// Run the whole pipeline once.
pub async fn run_pipeline<P: Prompter, E: TemplateExecutor>(
    project: &Project,
    prompter: &mut P,
    executor: &E,
    options: &PipelineOptions,
) -> std::result::Result<ExecutionReport, PipelineError> {
    let catalog = build_catalog(project.config.as_ref(), &options.builtin_root);
    let location = choose_template(&catalog, prompter, options.select.as_deref())
        .map_err(|e| PipelineError::new(Stage::Catalog, e))?;

    let template =
        verify(location, &project.root).map_err(|e| PipelineError::new(Stage::Verify, e))?;
    tracing::debug!(template = %template.id, skeleton = %template.template_path.display(), "template verified");

    let globals = project.globals();
    let questions =
        resolve(&template.prompts, &globals).map_err(|e| PipelineError::new(Stage::Prompt, e))?;

    let mut answers = collect_answers(&questions, &options.preset, prompter)
        .map_err(|e| PipelineError::new(Stage::Collect, e))?;
    if let Some(license) = &options.license {
        answers.insert("license".into(), Value::String(license.clone()));
    }

    let input = AssembleInput {
        project_root: project.root.clone(),
        base_version: options.base_version.clone(),
        private: options.private,
        version_file: Some(project.version_file()),
    };
    let option_set = assemble(&answers, &globals, &template, &input)
        .map_err(|e| PipelineError::new(Stage::Assemble, e))?;

    let settings = ExecuteSettings {
        is_mono_repo: project.is_mono_repo,
        keep_temporary_directories: options.keep_temporary_directories,
    };
    Ok(execute(executor, &option_set, &template, &settings).await)
}

fn choose_template<'a, P: Prompter>(
    catalog: &'a [TemplateLocation],
    prompter: &mut P,
    select: Option<&str>,
) -> Result<&'a TemplateLocation> {
    if catalog.is_empty() {
        anyhow::bail!("No templates found.");
    }

    if let Some(id) = select {
        return select_template(catalog, id).ok_or_else(|| {
            let available: Vec<&str> = catalog.iter().map(|l| l.id.as_str()).collect();
            anyhow::anyhow!(
                "Template '{}' not found. Available templates: {}",
                id,
                available.join(", ")
            )
        });
    }

    let index = prompter.select_template(catalog)?;
    catalog
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("Template selection {} is out of range", index))
}

/// Apply preset answers and ask for the rest. Every answer, preset or
/// collected, is validated before it is accepted.
fn collect_answers<P: Prompter>(
    questions: &[Question],
    preset: &Values,
    prompter: &mut P,
) -> Result<Values> {
    let mut answers = Values::new();
    let mut remaining = Vec::new();

    for question in questions {
        match preset.get(&question.name) {
            Some(value) => {
                answers.insert(question.name.clone(), checked_answer(question, value)?);
            }
            None => remaining.push(question.clone()),
        }
    }

    for (key, value) in preset {
        answers.entry(key.clone()).or_insert_with(|| value.clone());
    }

    if !remaining.is_empty() {
        let mut collected = prompter.collect(&remaining)?;
        for question in &remaining {
            if let Some(value) = collected.remove(&question.name) {
                answers.insert(question.name.clone(), checked_answer(question, &value)?);
            }
        }
        answers.extend(collected);
    }

    Ok(answers)
}

fn checked_answer(question: &Question, value: &Value) -> Result<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    question
        .check(&text)
        .map_err(|msg| anyhow::anyhow!("Invalid value for '{}': {}", question.name, msg))?;

    Ok(match question.kind {
        QuestionKind::Confirm => Value::Bool(parse_bool(&text).unwrap_or(false)),
        QuestionKind::Input => Value::String(text.trim().to_string()),
    })
}
