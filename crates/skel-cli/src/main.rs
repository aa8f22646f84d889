//! skel CLI - scaffold new packages from declarative templates

mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use skel_core::config::{builtin_template_dir, Project};
use skel_core::templates::catalog::is_shadowed;
use skel_core::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skel")]
#[command(about = "Scaffold new packages from declarative templates")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new package from a template
    New(NewArgs),
    /// List the templates available in this project
    List(ListArgs),
}

#[derive(Parser, Debug, Default)]
pub struct NewArgs {
    /// Template id to use instead of asking
    #[arg(short, long)]
    pub select: Option<String>,

    /// Pre-fill an answer (repeatable): --option id=my-package
    #[arg(short, long = "option", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Version for the new package (defaults to the monorepo version or 0.1.0)
    #[arg(long = "base-version")]
    pub base_version: Option<String>,

    /// Mark the new package as private
    #[arg(long)]
    pub private: Option<bool>,

    /// License for the new package
    #[arg(long)]
    pub license: Option<String>,

    /// Keep temporary directories for debugging
    #[arg(long = "keep-temp")]
    pub keep_temp: bool,

    #[command(flatten)]
    pub location: LocationArgs,
}

#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

#[derive(clap::Args, Debug, Default)]
pub struct LocationArgs {
    /// Project root (discovered from the current directory by default)
    #[arg(long = "project-root")]
    pub project_root: Option<PathBuf>,

    /// Directory holding the bundled templates (required when running an
    /// installed binary outside the source checkout)
    #[arg(long = "template-dir", env = skel_core::config::TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,
}

impl From<NewArgs> for CreateArgs {
    fn from(args: NewArgs) -> Self {
        CreateArgs {
            project_root: args.location.project_root,
            template_dir: args.location.template_dir,
            select: args.select,
            options: args.options,
            base_version: args.base_version,
            private: args.private,
            license: args.license,
            keep_temp: args.keep_temp,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn list_templates(args: ListArgs) -> Result<bool> {
    let root = match args.location.project_root {
        Some(root) => root,
        None => Project::discover(&std::env::current_dir()?),
    };
    let project = Project::load(root)?;
    let builtin_root = builtin_template_dir(args.location.template_dir);
    let catalog = skel_core::build_catalog(project.config.as_ref(), &builtin_root);

    if catalog.is_empty() {
        println!("{}", "No templates available".yellow());
        return Ok(true);
    }

    println!("{}", "Available templates".cyan().bold());
    println!();
    for (idx, location) in catalog.iter().enumerate() {
        if is_shadowed(&catalog, idx) {
            println!(
                "  {} {} {}",
                "->".dimmed(),
                location.id.dimmed(),
                format!("{} (overridden)", location.target).dimmed()
            );
        } else {
            println!("  {} {} {}", "->".blue(), location.id.green(), location.target);
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_logging(args.verbose)?;
    tracing::debug!(?args, "parsed arguments");

    let succeeded = match args.command {
        Some(Command::List(list_args)) => list_templates(list_args)?,
        Some(Command::New(new_args)) => skel_core::run(new_args.into()).await?,
        // No subcommand provided, default to the interactive new command
        None => skel_core::run(NewArgs::default().into()).await?,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("id=my-lib").unwrap(),
            ("id".to_string(), "my-lib".to_string())
        );
        assert_eq!(
            parse_key_value("description=a=b").unwrap(),
            ("description".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_new_args() {
        let args = Args::try_parse_from([
            "skel", "-v", "new", "--select", "library", "-o", "id=my-lib", "--option",
            "owner=team", "--private", "true", "--keep-temp",
        ])
        .unwrap();

        match args.command {
            Some(Command::New(new_args)) => {
                assert_eq!(args.verbose, 1);
                let create: CreateArgs = new_args.into();
                assert_eq!(create.select.as_deref(), Some("library"));
                assert_eq!(create.options.len(), 2);
                assert_eq!(create.private, Some(true));
                assert!(create.keep_temp);
            }
            other => panic!("expected new command, got {:?}", other),
        }
    }
}
