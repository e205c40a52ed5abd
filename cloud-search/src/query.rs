// ABOUTME: Parsed, reusable search query and the refined_search entry point
// ABOUTME: Malformed queries fail closed to an empty result instead of erroring

use crate::error::SearchError;
use crate::evaluate::{evaluate, unrecognized_key};
use crate::format::format_query;
use crate::item::SearchableItem;
use crate::parser::{self, Node};
use std::str::FromStr;

/// A query that has been formatted and parsed once and can be run many times.
///
/// An empty query has no tree and matches every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    source: String,
    root: Option<Node>,
}

impl Query {
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let source = format_query(raw);
        let root = parser::parse(&source)?;
        Ok(Self { source, root })
    }

    /// The formatted query text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Whether `item` matches when searched on its own
    pub fn matches(&self, item: &SearchableItem) -> bool {
        !self.filter(std::slice::from_ref(item)).is_empty()
    }

    /// Items that match, in their original order.
    ///
    /// A key that no item in `items` knows empties the whole result.
    pub fn filter<'a>(&self, items: &'a [SearchableItem]) -> Vec<&'a SearchableItem> {
        let Some(root) = &self.root else {
            return items.iter().collect();
        };

        if let Some(key) = unrecognized_key(root, items) {
            log::debug!("No item has a field named {:?}, matching nothing", key);
            return Vec::new();
        }

        items.iter().filter(|item| evaluate(root, item)).collect()
    }
}

impl FromStr for Query {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

/// Filter `items` with a free-text boolean query.
///
/// Never fails: a query that does not parse (say, `label:web AND` while the
/// user is still typing) matches nothing.
pub fn refined_search<'a>(query: &str, items: &'a [SearchableItem]) -> Vec<&'a SearchableItem> {
    match Query::parse(query) {
        Ok(parsed) => {
            let results = parsed.filter(items);
            log::debug!(
                "Query {:?} matched {} of {} items",
                parsed.as_str(),
                results.len(),
                items.len()
            );
            results
        }
        Err(err) => {
            log::debug!("Rejecting malformed query {:?}: {}", query, err);
            Vec::new()
        }
    }
}
