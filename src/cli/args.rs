//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Account hierarchy editor: add, delete, cut, copy and paste sub-hierarchies
#[derive(Parser, Debug)]
#[command(name = "acctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Initial tree file (default: configured tree_file, else built-in chart)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the initial tree as an outline
    Show,

    /// Apply an editor script and print the resulting tree
    Run {
        /// Script file, one event per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Report failing lines and continue instead of stopping
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Read editor events interactively from stdin
    Repl,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show global config path
    Path,
}
