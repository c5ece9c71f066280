//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use huddle_domain::AdviceKind;
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for huddle
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(author, version, about = "Fantasy football advice over multiple LLM backends")]
#[command(long_about = r#"
huddle routes fantasy football questions to one of several LLM backends,
falling back to the next backend when one fails. Backends may call league
data tools once per request; advice answers are always returned in a
complete, validated shape.

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./huddle.toml or ./.huddle.toml Project-level config
3. ~/.config/huddle/config.toml    Global config
Environment variables prefixed with HUDDLE_ override all files
(e.g. HUDDLE_ROUTER__DEFAULT_BACKEND=openai).

Example:
  huddle ask "Who are the top waiver adds at RB this week?"
  huddle advise start-sit "Start Jaylen Warren or Rhamondre Stevenson?"
  huddle --backend anthropic advise trade "My Kupp for their Hall?"
  huddle health
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend to try first (falls back to the configured order on failure)
    #[arg(short, long, global = true, value_name = "ID")]
    pub backend: Option<String>,

    /// Do not offer tools to the backend
    #[arg(long, global = true)]
    pub no_tools: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a free-form question and print the raw answer
    Ask {
        /// The question
        question: String,
    },
    /// Ask for structured advice (lineup, start-sit, trade, waiver)
    Advise {
        /// Advice kind
        #[arg(value_parser = parse_advice_kind)]
        kind: AdviceKind,

        /// The question
        question: String,

        /// League context (roster, scoring rules, opponent) passed to the backend
        #[arg(short, long, value_name = "TEXT")]
        context: Option<String>,
    },
    /// Probe every configured backend and the tool service
    Health,
    /// List the tools offered to backends
    Tools,
}

fn parse_advice_kind(s: &str) -> Result<AdviceKind, String> {
    s.parse::<AdviceKind>().map_err(|e| e.to_string())
}
