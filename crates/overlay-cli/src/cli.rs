//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Overlay compiler - apply overlay documents on top of a baseline
#[derive(Parser, Debug)]
#[command(name = "overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compile overlay documents into a management operation script
    ///
    /// The script is the baseline followed by the compiled operations.
    /// Skipped overlay keys are reported on stderr.
    ///
    /// Examples:
    ///   overlay compile -s schema.yml overlay.yml
    ///   overlay compile -s schema.yml -b baseline.json --json a.yml b.yml
    Compile {
        /// Schema file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        schema: PathBuf,

        /// Baseline operations (JSON)
        #[arg(short, long)]
        baseline: Option<PathBuf>,

        /// Compiler settings (TOML)
        #[arg(short, long, env = "OVERLAY_CONFIG")]
        config: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Overlay documents, applied in order
        #[arg(required = true)]
        overlays: Vec<PathBuf>,
    },

    /// Show what the schema registers at an address
    Inspect {
        /// Schema file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        schema: PathBuf,

        /// Address in CLI form, e.g. /subsystem=logging
        #[arg(short, long, default_value = "/")]
        address: String,
    },
}
