// ABOUTME: Normalizes raw user input before it reaches the query parser
// ABOUTME: Trims whitespace and rewrites && / || shorthand into AND / OR

use crate::constants::operators;

/// Trim the query and rewrite padded `&&` / `||` into the keyword operators.
///
/// Only the space-padded forms are rewritten; `a&&b` stays a single term.
/// Runs of shorthand operators share their padding (`a && && b`), so the
/// rewrite repeats until nothing is left to replace.
pub fn format_query(raw: &str) -> String {
    let mut query = raw.trim().to_string();
    while query.contains(operators::AND_SHORTHAND) || query.contains(operators::OR_SHORTHAND) {
        query = query
            .replace(operators::AND_SHORTHAND, " AND ")
            .replace(operators::OR_SHORTHAND, " OR ");
    }
    query
}
