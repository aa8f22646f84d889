//! skel core - scaffolding new packages from declarative templates
//!
//! # Architecture
//!
//! The pipeline runs strictly in order:
//!
//! - **Catalog** ([`templates::catalog`]) - bundled defaults plus project-declared templates
//! - **Verify** ([`templates::verify`]) - load a descriptor and check its skeleton and target path
//! - **Prompts** ([`prompts`]) - built-in and descriptor prompts resolved into questions
//! - **Options** ([`options`]) - globals, answers and computed fields merged into an [`OptionSet`]
//! - **Execute** ([`execute`]) - run a [`TemplateExecutor`] with partial-failure bookkeeping
//!
//! [`pipeline::run_pipeline`] drives all of them behind a [`Prompter`].
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter and `run` entry point
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use skel_core::{config::Project, pipeline, SkeletonExecutor};
//!
//! let project = Project::load(Project::discover(&std::env::current_dir()?))?;
//! let report = pipeline::run_pipeline(&project, &mut my_prompter, &SkeletonExecutor::new(), &opts).await?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod options;
pub mod pipeline;
pub mod prompts;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Project, TemplatesConfig, Values};
pub use error::{PipelineError, ScaffoldError, Stage};
pub use execute::{
    ExecutionContext, ExecutionOutcome, ExecutionReport, SkeletonExecutor, TemplateExecutor,
};
pub use options::{assemble, merge_layers, OptionSet};
pub use pipeline::{run_pipeline, PipelineOptions, Prompter};
pub use prompts::{resolve, Question};
pub use templates::{build_catalog, verify, Template, TemplateLocation};

#[cfg(feature = "tui")]
pub use tui::run;
