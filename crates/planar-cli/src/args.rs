//! Command-line argument definitions for the Planar CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, whether to descend into blocks, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Planar drawing flattener
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input drawing (TOML)
    #[arg(help = "Path to the input drawing")]
    pub input: String,

    /// Path to write the flattened drawing to; defaults to the input path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Descend into blocks and flatten elements on locked layers
    #[arg(long, conflicts_with = "no_recurse")]
    pub recurse: bool,

    /// Only flatten top-level elements on unlocked layers
    #[arg(long)]
    pub no_recurse: bool,

    /// Only report how many elements the root container holds
    #[arg(long)]
    pub count: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The recursion choice made on the command line, if any.
    pub fn recurse_choice(&self) -> Option<bool> {
        match (self.recurse, self.no_recurse) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}
