//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for multifill_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for multifill
#[derive(Parser, Debug)]
#[command(name = "multifill")]
#[command(author, version, about = "Author and inspect multifill problems")]
#[command(long_about = r#"
Multifill problems show each learner a seeded selection of subtasks,
described by a compact subtask string such as "1;1/2,1":

  ;      segment separator, segments keep their order
  ,      group separator, picks inside a segment are shuffled together
  p/b    pick p of the next b subtasks (a bare n means n/n)

Configuration files are loaded from (in priority order):
1. MULTIFILL_* environment variables
2. --config <path>          Explicit config file
3. ./multifill.toml         Project-level config
4. ~/.config/multifill/config.toml   Global config

Example:
  multifill parse "1;1/2,1" --count 4
  multifill sample "1;1/2,1" --count 4 --problem q1 --seed learner-7
  multifill check
  multifill show week1 q1 --seed learner-7
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format (overrides the configured one)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

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
    /// Parse a subtask string and print its structure
    Parse {
        /// Subtask string, e.g. "1;1/2,1"
        #[arg(allow_hyphen_values = true)]
        spec: String,

        /// Check the string against a problem with this many subtasks
        #[arg(short, long, value_name = "N")]
        count: Option<usize>,
    },

    /// Parse a score string (min/expected/total)
    Score {
        /// Score string, e.g. "2/3/4"
        #[arg(allow_hyphen_values = true)]
        spec: String,

        /// Number of subtasks, used for the default and per-subtask points
        #[arg(short, long, value_name = "N")]
        count: Option<usize>,
    },

    /// Print the subtask indices a learner would see
    Sample {
        /// Subtask string, e.g. "1;1/2,1"
        #[arg(allow_hyphen_values = true)]
        spec: String,

        /// Problem id, part of the selection seed
        #[arg(short, long, value_name = "ID")]
        problem: String,

        /// Learner seed
        #[arg(short, long)]
        seed: String,

        /// Number of subtasks in the problem; the string must match it
        #[arg(short, long, value_name = "N")]
        count: usize,
    },

    /// Validate the multifill problems of tasks (all tasks when none given)
    Check {
        /// Task ids
        tasks: Vec<String>,
    },

    /// Show the subtasks one learner sees for a problem
    Show {
        /// Task id
        task: String,

        /// Problem id
        problem: String,

        /// Learner seed
        #[arg(short, long)]
        seed: String,
    },

    /// Normalise a studio editor form (JSON) into stored problem content
    Normalize {
        /// JSON file holding the submitted form
        #[arg(value_name = "FORM_JSON_FILE")]
        file: PathBuf,
    },
}
