// ABOUTME: Boolean search query engine for cloud console resources
// ABOUTME: Formats, parses, and evaluates free-text queries over searchable items

pub mod clause;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod item;
pub mod parser;
pub mod query;
pub mod results;
pub mod test_helpers;

pub use clause::{real_entity_key, ClauseInfo};
pub use error::SearchError;
pub use evaluate::{
    does_search_term_match_item_field, evaluate, search_default_fields, test_clause,
    unrecognized_key,
};
pub use format::format_query;
pub use item::{
    load_items, load_items_from_path, EntityType, FieldValue, ItemValue, SearchableItem,
};
pub use parser::Node;
pub use query::{refined_search, Query};
pub use results::{search, ResultGroup, SearchOptions, SearchResults};

pub type Result<T> = std::result::Result<T, SearchError>;
