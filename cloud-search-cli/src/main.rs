// ABOUTME: Main entry point for the cloudsearch CLI application
// ABOUTME: Loads config, expands aliases, and dispatches search, explain, and completions commands

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cloud_search::{load_items_from_path, search, EntityType, Query, SearchError, SearchOptions};
use std::env;
use std::io::IsTerminal;

use cloud_search_cli::aliases::AliasExpander;
use cloud_search_cli::cli::{Cli, Commands};
use cloud_search_cli::cli_output::CliOutput;
use cloud_search_cli::completions;
use cloud_search_cli::config::Config;
use cloud_search_cli::constants::{env as env_vars, formats};
use cloud_search_cli::output::{JsonFormatter, OutputFormat, TableFormatter, YamlFormatter};

fn main() {
    let cli_output = CliOutput::new();

    if let Err(err) = run(&cli_output) {
        cli_output.error(&format!("{:#}", err));
        if let Some(search_err) = err.downcast_ref::<SearchError>() {
            if let Some(help) = search_err.help_text() {
                cli_output.hint(help);
            }
            if search_err.is_query_error() {
                cli_output.hint("Run `cloudsearch explain <QUERY>` to check how a query parses");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli_output: &CliOutput) -> Result<()> {
    let config = Config::load()?;

    let args: Vec<String> = env::args().collect();
    let args = match config.aliases.clone() {
        Some(aliases) => AliasExpander::new(aliases).expand(args)?,
        None => args,
    };
    let cli = Cli::parse_from(args);

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let use_color = cli.force_color
        || (!cli.no_color
            && env::var(env_vars::NO_COLOR).is_err()
            && env::var(env_vars::TERM).unwrap_or_default() != "dumb"
            && std::io::stdout().is_terminal());

    match cli.command {
        Commands::Search {
            query,
            items,
            entity_types,
            limit,
            json,
            yaml,
            pretty,
        } => {
            // Surface syntax errors here; the library itself fails closed
            let parsed = Query::parse(&query)?;
            log::debug!("Formatted query: {:?}", parsed.as_str());

            let items_path = items.or_else(|| config.items_file.clone()).ok_or_else(|| {
                anyhow!("No items file given. Pass --items FILE or set items_file in cloudsearch.toml")
            })?;
            let inventory = load_items_from_path(&items_path)
                .with_context(|| format!("Failed to load items from {}", items_path))?;

            let entity_types: Vec<EntityType> = entity_types
                .iter()
                .map(|name| EntityType::from(name.as_str()))
                .collect();
            for entity_type in &entity_types {
                if let EntityType::Unknown(name) = entity_type {
                    cli_output.warning(&format!("Unknown entity type '{}'", name));
                }
            }

            let options = SearchOptions {
                query,
                entity_types,
                limit: limit.map(|l| l as usize).or(config.default_limit),
            };
            let results = search(&options, &inventory);

            let formatter: Box<dyn OutputFormat> = if json {
                Box::new(JsonFormatter::new(pretty))
            } else if yaml {
                Box::new(YamlFormatter)
            } else {
                match config.preferred_format.as_deref() {
                    Some(formats::JSON) => Box::new(JsonFormatter::new(false)),
                    Some(formats::YAML) => Box::new(YamlFormatter),
                    _ => Box::new(TableFormatter::new(use_color)),
                }
            };
            let is_table = !json
                && !yaml
                && config
                    .preferred_format
                    .as_deref()
                    .is_none_or(|format| format == formats::TABLE);

            if results.is_empty() && is_table {
                println!("No results found.");
                return Ok(());
            }

            println!("{}", formatter.format_results(&results)?);

            if is_table {
                for group in results.groups.iter().filter(|group| group.is_truncated()) {
                    cli_output.info(&format!(
                        "Showing {} of {} {} results",
                        group.items.len(),
                        group.matched,
                        group.entity_type
                    ));
                }
            }
        }
        Commands::Explain { query, pretty } => {
            let parsed = Query::parse(&query)?;
            let tree = parsed.tree();
            let output = if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{}", output);
        }
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                print!("{}", completions::installation_instructions(shell));
            } else {
                completions::write_completions(shell, &mut std::io::stdout());
            }
        }
    }

    Ok(())
}
