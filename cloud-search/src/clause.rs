// ABOUTME: Decomposes a single query term into field key, values, and negation
// ABOUTME: Also resolves user-facing key aliases to the real item field names

use crate::constants::FIELD_SUBSTITUTIONS;

/// What a single leaf of the query tree asks for.
///
/// `label:web,db` has field `label` and terms `web`, `db`; `-tag:old` is the
/// negated form; a clause with no key is a simple query with one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseInfo {
    pub field_name: Option<String>,
    pub search_terms: Vec<String>,
    pub is_negated: bool,
}

impl ClauseInfo {
    pub fn parse(clause: &str) -> Self {
        let (is_negated, body) = match clause.strip_prefix('-') {
            Some(rest) if !rest.is_empty() => (true, rest),
            _ => (false, clause),
        };

        match split_outside_quotes(body, ':', Some(1)).as_slice() {
            [key, values] if !key.is_empty() => ClauseInfo {
                field_name: Some(key.to_string()),
                search_terms: split_outside_quotes(values, ',', None)
                    .into_iter()
                    .map(unquote)
                    .filter(|term| !term.is_empty())
                    .map(str::to_string)
                    .collect(),
                is_negated,
            },
            _ => ClauseInfo {
                field_name: None,
                search_terms: vec![unquote(body).to_string()],
                is_negated,
            },
        }
    }

    /// A clause without a field key searches the default fields
    pub fn is_simple(&self) -> bool {
        self.field_name.is_none()
    }

    /// Field key after alias substitution
    pub fn real_field_name(&self) -> Option<&str> {
        self.field_name.as_deref().map(real_entity_key)
    }
}

/// Map a user-facing key alias onto the item field it stands for.
///
/// Keys without a substitution pass through unchanged.
pub fn real_entity_key(key: &str) -> &str {
    FIELD_SUBSTITUTIONS.get(key).copied().unwrap_or(key)
}

/// Split on `separator` while ignoring separators inside double quotes.
/// `limit` caps the number of splits.
fn split_outside_quotes(input: &str, separator: char, limit: Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (offset, ch) in input.char_indices() {
        if limit.is_some_and(|limit| parts.len() >= limit) {
            break;
        }
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => {
                parts.push(&input[start..offset]);
                start = offset + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&input[start..]);
    parts
}

fn unquote(term: &str) -> &str {
    term.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(term)
}
