// ABOUTME: Evaluates a parsed query tree against a single searchable item
// ABOUTME: Leaf clauses match fields by case-insensitive substring; AND/OR combine children

use crate::clause::ClauseInfo;
use crate::constants::fields;
use crate::item::SearchableItem;
use crate::parser::Node;

/// Walk the tree and decide whether `item` satisfies it
pub fn evaluate(node: &Node, item: &SearchableItem) -> bool {
    match node {
        Node::String { value } => test_clause(value, item),
        Node::And { values } => values.iter().all(|child| evaluate(child, item)),
        Node::Or { values } => values.iter().any(|child| evaluate(child, item)),
    }
}

/// The first field key in the tree that no item in `items` knows.
///
/// A query naming such a key matches nothing, even under OR or negation, so
/// callers check this once over the whole collection before evaluating.
pub fn unrecognized_key(node: &Node, items: &[SearchableItem]) -> Option<String> {
    match node {
        Node::String { value } => {
            let info = ClauseInfo::parse(value);
            let field = info.real_field_name()?;
            let known = items.iter().any(|item| item.is_known_field(field));
            (!known).then(|| field.to_string())
        }
        Node::And { values } | Node::Or { values } => values
            .iter()
            .find_map(|child| unrecognized_key(child, items)),
    }
}

/// Test one leaf clause against an item.
///
/// Keyed clauses need every listed value to match the field; a negated keyed
/// clause needs every listed value to miss it. A field the item lacks never
/// matches, so the negated clause over it holds.
pub fn test_clause(clause: &str, item: &SearchableItem) -> bool {
    let info = ClauseInfo::parse(clause);

    let Some(field) = info.real_field_name() else {
        let found = info
            .search_terms
            .iter()
            .any(|term| search_default_fields(item, term));
        return found != info.is_negated;
    };

    if info.is_negated {
        info.search_terms
            .iter()
            .all(|term| !does_search_term_match_item_field(term, item, field))
    } else {
        info.search_terms
            .iter()
            .all(|term| does_search_term_match_item_field(term, item, field))
    }
}

/// Whether `term` appears in any of the fields searched by a keyless clause
pub fn search_default_fields(item: &SearchableItem, term: &str) -> bool {
    fields::DEFAULT_SEARCH_FIELDS
        .iter()
        .any(|field| does_search_term_match_item_field(term, item, field))
}

/// Whether `term` appears in the named field. Missing fields never match.
pub fn does_search_term_match_item_field(term: &str, item: &SearchableItem, field: &str) -> bool {
    let needle = term.to_lowercase();
    item.field(field)
        .is_some_and(|value| value.contains(&needle))
}
