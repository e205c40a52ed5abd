// ABOUTME: Search options and results grouped by entity type
// ABOUTME: Runs refined_search, narrows to requested types, and caps each group

use crate::item::{EntityType, SearchableItem};
use crate::query::refined_search;
use serde::Serialize;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct SearchOptions {
    #[builder(setter(into))]
    pub query: String,

    /// Only keep these entity types; empty keeps everything
    #[builder(default)]
    pub entity_types: Vec<EntityType>,

    /// Cap on results per entity type
    #[builder(default, setter(strip_option))]
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            entity_types: Vec::new(),
            limit: None,
        }
    }

    fn wants(&self, entity_type: &EntityType) -> bool {
        self.entity_types.is_empty() || self.entity_types.contains(entity_type)
    }
}

/// Matching items of one entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultGroup<'a> {
    #[serde(rename = "entityType")]
    pub entity_type: EntityType,
    /// Matches before the per-type limit was applied
    pub matched: usize,
    pub items: Vec<&'a SearchableItem>,
}

impl ResultGroup<'_> {
    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.matched
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<'a> {
    pub query: String,
    pub groups: Vec<ResultGroup<'a>>,
}

impl<'a> SearchResults<'a> {
    /// Number of items shown across all groups
    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, entity_type: &EntityType) -> Option<&ResultGroup<'a>> {
        self.groups
            .iter()
            .find(|group| &group.entity_type == entity_type)
    }

    /// All shown items, group by group
    pub fn items(&self) -> impl Iterator<Item = &'a SearchableItem> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().copied())
    }
}

/// Run a search and group the hits by entity type.
///
/// Groups appear in the order their first item appears in `items`, and each
/// group keeps the input order of its items.
pub fn search<'a>(options: &SearchOptions, items: &'a [SearchableItem]) -> SearchResults<'a> {
    let mut groups: Vec<ResultGroup<'a>> = Vec::new();

    for item in refined_search(&options.query, items) {
        if !options.wants(&item.entity_type) {
            continue;
        }

        let index = match groups
            .iter()
            .position(|group| group.entity_type == item.entity_type)
        {
            Some(index) => index,
            None => {
                groups.push(ResultGroup {
                    entity_type: item.entity_type.clone(),
                    matched: 0,
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        group.matched += 1;
        if options.limit.is_none_or(|limit| group.items.len() < limit) {
            group.items.push(item);
        }
    }

    // A zero limit leaves nothing to show for any type
    groups.retain(|group| !group.items.is_empty());

    log::debug!(
        "Search {:?} produced {} groups",
        options.query,
        groups.len()
    );

    SearchResults {
        query: options.query.clone(),
        groups,
    }
}
