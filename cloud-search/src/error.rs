// ABOUTME: Custom error types for the search engine with user-friendly messages
// ABOUTME: Distinguishes malformed queries from item loading failures

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Query ends where a search term was expected")]
    UnexpectedEnd,

    #[error("Operator {operator} at position {position} has no search term on one side")]
    DanglingOperator { operator: String, position: usize },

    #[error("Incomplete operator '{token}' at position {position}")]
    IncompleteOperator { token: String, position: usize },

    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("Unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("Parentheses nested too deeply at position {position}")]
    TooDeeplyNested { position: usize },

    #[error("Invalid item data: {0}")]
    Item(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl SearchError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            SearchError::UnexpectedEnd | SearchError::DanglingOperator { .. } => {
                Some("AND and OR need a search term on both sides (e.g. label:web AND tag:prod)")
            }
            SearchError::IncompleteOperator { .. } => {
                Some("Boolean operators are written in uppercase as AND or OR")
            }
            SearchError::UnbalancedParenthesis { .. } => {
                Some("Every '(' needs a matching ')'")
            }
            SearchError::UnterminatedQuote { .. } => Some("Close the quoted phrase with '\"'"),
            SearchError::TooDeeplyNested { .. } => {
                Some("Remove redundant parentheses; groups may nest at most 64 levels")
            }
            SearchError::Item(_) => Some(
                "Items must be a JSON array of objects with value, label, entityType and an optional data object",
            ),
            SearchError::Io(_) => None,
        }
    }

    /// Whether this error came from parsing a query rather than loading items
    pub fn is_query_error(&self) -> bool {
        !matches!(self, SearchError::Item(_) | SearchError::Io(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Item(err.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err.to_string())
    }
}
