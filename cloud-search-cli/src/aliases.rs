// ABOUTME: Command alias expansion system with recursion detection and cycle prevention
// ABOUTME: Expands user-defined aliases such as `prod = ["search", "tag:production"]` before parsing

use crate::config::ConfigAliases;
use anyhow::{anyhow, Result};
use std::collections::HashSet;

const MAX_EXPANSION_DEPTH: usize = 10;

pub struct AliasExpander {
    aliases: ConfigAliases,
}

impl AliasExpander {
    pub fn new(aliases: ConfigAliases) -> Self {
        Self { aliases }
    }

    /// Expand aliases in the command arguments
    ///
    /// Takes a full command line (including program name) and expands the command
    /// word until it is no longer an alias. Arguments after the command are kept
    /// in place, so `cloudsearch prod --json` becomes
    /// `cloudsearch search tag:production --json`.
    pub fn expand(&self, mut args: Vec<String>) -> Result<Vec<String>> {
        if args.len() < 2 {
            return Ok(args);
        }

        let mut expansion_history = HashSet::new();

        for _ in 0..MAX_EXPANSION_DEPTH {
            let command = &args[1];

            let Some(alias_args) = self.aliases.expand(command) else {
                return Ok(args);
            };

            if !expansion_history.insert(command.clone()) {
                return Err(anyhow!("Recursive alias detected: {}", command));
            }

            log::debug!("Expanding alias {} to {:?}", command, alias_args);

            let mut new_args = vec![args[0].clone()];
            new_args.extend(alias_args.iter().cloned());
            new_args.extend_from_slice(&args[2..]);
            args = new_args;
        }

        if self.is_alias(&args[1]) {
            return Err(anyhow!(
                "Maximum alias expansion depth exceeded ({})",
                MAX_EXPANSION_DEPTH
            ));
        }

        Ok(args)
    }

    pub fn is_alias(&self, command: &str) -> bool {
        self.aliases.expand(command).is_some()
    }
}

/// Expand aliases in a command line string
///
/// Splits the command line on whitespace and expands aliases, returning the result as a string.
pub fn expand_aliases_from_string(aliases: ConfigAliases, command_line: &str) -> Result<String> {
    let args: Vec<String> = command_line
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();
    let expander = AliasExpander::new(aliases);
    let expanded = expander.expand(args)?;
    Ok(expanded.join(" "))
}
