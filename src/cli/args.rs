//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::TraversalStrategy;

/// Coding challenges: render node trees to markup, strip substrings
#[derive(Parser, Debug)]
#[command(name = "challenges")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .challenges.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a tree file to markup, one string per line
    Render {
        /// Tree file (TOML); falls back to render.default_tree
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Traversal strategy, overrides config
        #[arg(short, long, value_parser = parse_strategy)]
        strategy: Option<TraversalStrategy>,
    },

    /// Show a tree file as an outline
    Outline {
        /// Tree file (TOML); falls back to render.default_tree
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Remove substrings that also occur in the original string
    Strip {
        /// Original string
        original: String,
        /// Substrings to remove, in order
        #[arg(num_args = 1.., required = true)]
        instances: Vec<String>,
    },

    /// Run the built-in sample cases
    Samples,

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

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

fn parse_strategy(s: &str) -> Result<TraversalStrategy, String> {
    s.parse().map_err(|e: crate::domain::DomainError| e.to_string())
}
