//! Command execution for the CLI

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::EditorSession;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::script::{parse_line, parse_script, Outcome};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::seed::chart_of_accounts;
use crate::domain::{ToOutline, TreeStore};
use crate::infrastructure::traits::RealFileSystem;
use crate::infrastructure::{InfraError, TreeLoader};

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let loader = TreeLoader::new(Arc::new(RealFileSystem));

    match &cli.command {
        Some(Commands::Show) | None => cmd_show(&loader, cli, &settings),
        Some(Commands::Run { script, keep_going }) => {
            cmd_run(&loader, cli, &settings, script, *keep_going)
        }
        Some(Commands::Repl) => cmd_repl(&loader, cli, &settings),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&settings),
            ConfigCommands::Path => cmd_config_path(),
        },
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Initial tree: `--tree`, then configured `tree_file`, then the built-in chart.
fn initial_tree(loader: &TreeLoader, cli: &Cli, settings: &Settings) -> CliResult<TreeStore> {
    match cli.tree.as_deref().or(settings.tree_file.as_deref()) {
        Some(path) => Ok(loader.load_tree(path)?),
        None => Ok(chart_of_accounts().map_err(InfraError::from)?),
    }
}

fn open_session(loader: &TreeLoader, cli: &Cli, settings: &Settings) -> CliResult<EditorSession> {
    let store = initial_tree(loader, cli, settings)?;
    Ok(EditorSession::new(store, settings.relocation.offset()))
}

#[instrument(skip_all)]
fn cmd_show(loader: &TreeLoader, cli: &Cli, settings: &Settings) -> CliResult<()> {
    let store = initial_tree(loader, cli, settings)?;
    output::info(&store.to_outline());
    Ok(())
}

#[instrument(skip(loader, cli, settings))]
fn cmd_run(
    loader: &TreeLoader,
    cli: &Cli,
    settings: &Settings,
    script: &Path,
    keep_going: bool,
) -> CliResult<()> {
    let text = loader.load_script(script)?;
    let lines = parse_script(&text)?;
    let mut session = open_session(loader, cli, settings)?;
    let mut failures = 0;

    for (number, line) in lines {
        match line.apply(&mut session) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => print_outcome(&outcome),
            Err(e) if keep_going => {
                output::warning(&format!("line {}: {}", number, e));
                failures += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    output::header("Result:");
    output::info(&session.workspace().store().to_outline());
    if failures > 0 {
        return Err(CliError::Usage(format!("{} script lines failed", failures)));
    }
    Ok(())
}

#[instrument(skip_all)]
fn cmd_repl(loader: &TreeLoader, cli: &Cli, settings: &Settings) -> CliResult<()> {
    let mut session = open_session(loader, cli, settings)?;
    output::info(&session.workspace().store().to_outline());

    let stdin = io::stdin();
    output::prompt("acctree>");
    for raw in stdin.lock().lines() {
        let raw = raw.map_err(|e| InfraError::io("read stdin", e))?;
        match parse_line(&raw) {
            Ok(None) => {}
            Ok(Some(line)) => match line.apply(&mut session) {
                Ok(Outcome::Quit) => break,
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => output::error(&e),
            },
            Err(e) => output::error(&e),
        }
        output::prompt("acctree>");
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Message(msg) => output::success(msg),
        Outcome::Outline(outline) => output::info(outline),
        Outcome::Quit => {}
    }
}

fn cmd_config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no config directory available on this platform"),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
