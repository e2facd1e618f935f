//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{load_document, run_samples, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{remove_instances, Document, TraversalStrategy};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = cli
        .project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let project_dir = project_dir.as_deref();

    match &cli.command {
        Some(Commands::Render { file, strategy }) => {
            cmd_render(project_dir, file.as_deref(), *strategy)
        }
        Some(Commands::Outline { file }) => cmd_outline(project_dir, file.as_deref()),
        Some(Commands::Strip {
            original,
            instances,
        }) => cmd_strip(original, instances),
        Some(Commands::Samples) => cmd_samples(),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(project_dir),
            ConfigCommands::Init { global, force } => {
                cmd_config_init(project_dir, *global, *force)
            }
            ConfigCommands::Path => cmd_config_path(project_dir),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    }
}

/// Load the tree file given on the command line, or the configured default.
fn resolve_document(settings: &Settings, file: Option<&Path>) -> CliResult<Document> {
    let path = file
        .map(Path::to_path_buf)
        .or_else(|| settings.render.default_tree.clone())
        .ok_or_else(|| {
            CliError::Usage("no tree file given and render.default_tree is not set".to_string())
        })?;
    debug!(path = %path.display(), "loading tree");
    Ok(load_document(&path)?)
}

#[instrument(level = "debug")]
fn cmd_render(
    project_dir: Option<&Path>,
    file: Option<&Path>,
    strategy: Option<TraversalStrategy>,
) -> CliResult<()> {
    let settings = Settings::load(project_dir)?;
    let doc = resolve_document(&settings, file)?;
    let strategy = strategy.unwrap_or(settings.render.strategy);

    for line in doc.render_with(strategy, settings.render.recursion_limit)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_outline(project_dir: Option<&Path>, file: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(project_dir)?;
    let doc = resolve_document(&settings, file)?;
    output::info(&doc.root().outline());
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_strip(original: &str, instances: &[String]) -> CliResult<()> {
    let cleaned = remove_instances(original, instances)?;
    output::info(&cleaned);
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_samples() -> CliResult<()> {
    let outcomes = run_samples();
    let total = outcomes.len();
    let mut failed = 0;

    for outcome in &outcomes {
        if outcome.passed() {
            output::success(&format!("Test #{} --> Passed: {}", outcome.number, outcome.name));
        } else {
            failed += 1;
            output::failure(&format!("Test #{} --> Failed: {}", outcome.number, outcome.name));
            output::detail(&format!("Expected: {}", outcome.expected));
        }
        match &outcome.actual {
            Ok(actual) => output::detail(&format!("Your output: {actual}")),
            Err(e) => output::detail(&format!("Your output: error: {e}")),
        }
    }

    if failed > 0 {
        return Err(CliError::SamplesFailed { failed, total });
    }
    Ok(())
}

fn cmd_config_show(project_dir: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(project_dir)?;
    output::header("Effective configuration");
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_path(project_dir: Option<&Path>) -> CliResult<()> {
    fn describe(path: &Path) -> String {
        let state = if path.exists() { "exists" } else { "not found" };
        format!("{} ({state})", path.display())
    }

    output::header("Config files");
    match global_config_path() {
        Some(path) => output::detail(&format!("global: {}", describe(&path))),
        None => output::detail("global: (no config directory available)"),
    }
    if let Some(dir) = project_dir {
        output::detail(&format!("local:  {}", describe(&local_config_path(dir))));
    }
    Ok(())
}

fn cmd_config_init(project_dir: Option<&Path>, global: bool, force: bool) -> CliResult<()> {
    let target: PathBuf = if global {
        global_config_path().ok_or_else(|| {
            CliError::Usage("cannot determine global config directory".to_string())
        })?
    } else {
        let dir = project_dir.ok_or_else(|| {
            CliError::Usage("cannot determine project directory, use -C".to_string())
        })?;
        local_config_path(dir)
    };

    if target.exists() && !force {
        return Err(CliError::Usage(format!(
            "config already exists: {} (use --force to overwrite)",
            target.display()
        )));
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
    }
    std::fs::write(&target, Settings::template()).with_path_context("write config", &target)?;

    output::action("Created", &target.display());
    Ok(())
}
