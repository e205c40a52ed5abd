// ABOUTME: CLI argument definitions for the cloudsearch application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use crate::constants::limits::MAX_RESULT_LIMIT;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cloudsearch")]
#[command(about = "Search cloud resources with boolean queries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, global = true, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search items with a query such as `tag:prod AND -status:offline`
    Search {
        /// Search query string; may start with `-` to negate
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// JSON file holding the items to search
        #[arg(long, short, value_name = "FILE")]
        items: Option<String>,

        /// Only show these entity types (repeatable)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        entity_types: Vec<String>,

        /// Maximum number of results per entity type
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(0..=MAX_RESULT_LIMIT as u64))]
        limit: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output as YAML
        #[arg(long, conflicts_with = "json")]
        yaml: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Show how a query is parsed
    Explain {
        /// Search query string; may start with `-` to negate
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Pretty print the parsed tree
        #[arg(long)]
        pretty: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Print installation instructions instead of the script
        #[arg(long)]
        instructions: bool,
    },
}
