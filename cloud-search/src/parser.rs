// ABOUTME: Tokenizer and recursive-descent parser for boolean search queries
// ABOUTME: Builds a closed AND/OR/term tree; malformed input yields a SearchError

use crate::constants::operators;
use crate::error::SearchError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing words that look like a half-typed or mistyped operator
static INCOMPLETE_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:AN|ANDD+|O|ORR+)$").expect("valid operator pattern"));

/// Parsed query tree.
///
/// Serializes as `{"type": "string", "value": ...}` for terms and
/// `{"type": "and" | "or", "values": [...]}` for combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    String { value: String },
    And { values: Vec<Node> },
    Or { values: Vec<Node> },
}

impl Node {
    pub fn term(value: impl Into<String>) -> Self {
        Node::String {
            value: value.into(),
        }
    }

    /// Number of nodes in the tree, this one included
    pub fn node_count(&self) -> usize {
        match self {
            Node::String { .. } => 1,
            Node::And { values } | Node::Or { values } => {
                1 + values.iter().map(Node::node_count).sum::<usize>()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Word(String),
    And,
    Or,
    LParen,
    RParen,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, SearchError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::LParen,
                    position,
                });
            }
            ')' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::RParen,
                    position,
                });
            }
            _ => {
                let mut word = String::new();
                let mut quote_start = None;

                while let Some(&(offset, c)) = chars.peek() {
                    if quote_start.is_none() && (c.is_whitespace() || c == '(' || c == ')') {
                        break;
                    }
                    if c == '"' {
                        quote_start = match quote_start {
                            Some(_) => None,
                            None => Some(offset),
                        };
                    }
                    word.push(c);
                    chars.next();
                }

                if let Some(start) = quote_start {
                    return Err(SearchError::UnterminatedQuote { position: start });
                }

                let kind = match word.as_str() {
                    operators::AND => TokenKind::And,
                    operators::OR => TokenKind::Or,
                    _ => TokenKind::Word(word),
                };
                tokens.push(Token { kind, position });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn is_last(&self) -> bool {
        self.cursor + 1 == self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        self.cursor += 1;
        token
    }

    // expr := and_expr (OR and_expr)*
    fn parse_or(&mut self) -> Result<Node, SearchError> {
        let mut values = Vec::new();
        push_flattened(&mut values, self.parse_and()?, or_children);

        while matches!(self.peek(), Some(Token { kind: TokenKind::Or, .. })) {
            self.advance();
            push_flattened(&mut values, self.parse_and()?, or_children);
        }

        Ok(collapse(values, |values| Node::Or { values }))
    }

    // and_expr := primary ((AND)? primary)*
    fn parse_and(&mut self) -> Result<Node, SearchError> {
        let mut values = Vec::new();
        push_flattened(&mut values, self.parse_primary()?, and_children);

        loop {
            let next = match self.peek() {
                Some(token) => token.clone(),
                None => break,
            };

            match next.kind {
                TokenKind::And => {
                    self.advance();
                }
                TokenKind::Word(_) | TokenKind::LParen => {}
                TokenKind::Or | TokenKind::RParen => break,
            }

            push_flattened(&mut values, self.parse_primary()?, and_children);
        }

        Ok(collapse(values, |values| Node::And { values }))
    }

    // primary := WORD | '(' expr ')'
    fn parse_primary(&mut self) -> Result<Node, SearchError> {
        // Only a word closing out a longer query can be a mistyped operator
        let trailing = self.cursor > 0 && self.is_last();
        let token = self.advance().ok_or(SearchError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Word(word) if trailing && INCOMPLETE_OPERATOR.is_match(&word) => {
                Err(SearchError::IncompleteOperator {
                    token: word,
                    position: token.position,
                })
            }
            TokenKind::Word(word) => Ok(Node::String { value: word }),
            TokenKind::LParen => {
                if self.depth == operators::MAX_NESTING_DEPTH {
                    return Err(SearchError::TooDeeplyNested {
                        position: token.position,
                    });
                }
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;

                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    _ => Err(SearchError::UnbalancedParenthesis {
                        position: token.position,
                    }),
                }
            }
            TokenKind::RParen => Err(SearchError::UnbalancedParenthesis {
                position: token.position,
            }),
            TokenKind::And => Err(SearchError::DanglingOperator {
                operator: operators::AND.to_string(),
                position: token.position,
            }),
            TokenKind::Or => Err(SearchError::DanglingOperator {
                operator: operators::OR.to_string(),
                position: token.position,
            }),
        }
    }
}

fn or_children(node: Node) -> Result<Vec<Node>, Node> {
    match node {
        Node::Or { values } => Ok(values),
        other => Err(other),
    }
}

fn and_children(node: Node) -> Result<Vec<Node>, Node> {
    match node {
        Node::And { values } => Ok(values),
        other => Err(other),
    }
}

/// Push `node`, splicing in its children when it is the same combinator
fn push_flattened(
    values: &mut Vec<Node>,
    node: Node,
    children: impl Fn(Node) -> Result<Vec<Node>, Node>,
) {
    match children(node) {
        Ok(children) => values.extend(children),
        Err(node) => values.push(node),
    }
}

fn collapse(mut values: Vec<Node>, combine: impl Fn(Vec<Node>) -> Node) -> Node {
    if values.len() == 1 {
        values.remove(0)
    } else {
        combine(values)
    }
}

/// Parse an already formatted query.
///
/// Returns `Ok(None)` for a query with no tokens at all.
pub fn parse(query: &str) -> Result<Option<Node>, SearchError> {
    let tokens = tokenize(query)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let root = parser.parse_or()?;

    if let Some(extra) = parser.peek() {
        return Err(match extra.kind {
            TokenKind::RParen => SearchError::UnbalancedParenthesis {
                position: extra.position,
            },
            _ => SearchError::UnexpectedEnd,
        });
    }

    log::debug!("Parsed query {:?} into {} nodes", query, root.node_count());
    Ok(Some(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and(values: Vec<Node>) -> Node {
        Node::And { values }
    }

    fn or(values: Vec<Node>) -> Node {
        Node::Or { values }
    }

    fn t(value: &str) -> Node {
        Node::term(value)
    }

    #[test]
    fn test_single_term() {
        assert_eq!(parse("label:web").unwrap(), Some(t("label:web")));
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_flat_and_chain() {
        assert_eq!(
            parse("a AND b AND c").unwrap(),
            Some(and(vec![t("a"), t("b"), t("c")]))
        );
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(
            parse("label:test-linode tags:my-app2").unwrap(),
            Some(and(vec![t("label:test-linode"), t("tags:my-app2")]))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            parse("a AND b OR c").unwrap(),
            Some(or(vec![and(vec![t("a"), t("b")]), t("c")]))
        );
        assert_eq!(
            parse("a OR b AND c").unwrap(),
            Some(or(vec![t("a"), and(vec![t("b"), t("c")])]))
        );
    }

    #[test]
    fn test_parentheses_group() {
        assert_eq!(
            parse("(a OR b) AND c").unwrap(),
            Some(and(vec![or(vec![t("a"), t("b")]), t("c")]))
        );
        assert_eq!(
            parse("a (b OR c)").unwrap(),
            Some(and(vec![t("a"), or(vec![t("b"), t("c")])]))
        );
    }

    #[test]
    fn test_nested_same_operator_is_flattened() {
        assert_eq!(
            parse("(a OR b) OR c").unwrap(),
            Some(or(vec![t("a"), t("b"), t("c")]))
        );
        assert_eq!(
            parse("a AND (b AND c)").unwrap(),
            Some(and(vec![t("a"), t("b"), t("c")]))
        );
    }

    #[test]
    fn test_quoted_phrase_is_one_term() {
        assert_eq!(
            parse("label:\"my box\" OR \"web (old)\"").unwrap(),
            Some(or(vec![t("label:\"my box\""), t("\"web (old)\"")]))
        );
    }

    #[test]
    fn test_lowercase_operators_are_terms() {
        assert_eq!(
            parse("a and b").unwrap(),
            Some(and(vec![t("a"), t("and"), t("b")]))
        );
    }

    #[test]
    fn test_trailing_operator_fails() {
        assert_eq!(parse("label:x AND"), Err(SearchError::UnexpectedEnd));
        assert_eq!(parse("label:x OR"), Err(SearchError::UnexpectedEnd));
    }

    #[test]
    fn test_incomplete_trailing_operator_fails() {
        for token in ["AN", "ANDD", "O", "ORR", "ORRR"] {
            let query = format!("label:x {}", token);
            assert_eq!(
                parse(&query),
                Err(SearchError::IncompleteOperator {
                    token: token.to_string(),
                    position: 8
                }),
                "query {:?} should fail",
                query
            );
        }
    }

    #[test]
    fn test_incomplete_operator_after_or_fails() {
        assert_eq!(
            parse("label:x OR AN"),
            Err(SearchError::IncompleteOperator {
                token: "AN".to_string(),
                position: 11
            })
        );
        assert_eq!(
            parse("(a OR b) ANDD"),
            Err(SearchError::IncompleteOperator {
                token: "ANDD".to_string(),
                position: 9
            })
        );
    }

    #[test]
    fn test_single_letter_a_is_a_term() {
        assert_eq!(
            parse("label:building A").unwrap(),
            Some(and(vec![t("label:building"), t("A")]))
        );
        assert_eq!(
            parse("tag:x OR A").unwrap(),
            Some(or(vec![t("tag:x"), t("A")]))
        );
    }

    #[test]
    fn test_operator_lookalikes_elsewhere_are_terms() {
        assert_eq!(
            parse("AN label:x").unwrap(),
            Some(and(vec![t("AN"), t("label:x")]))
        );
        assert_eq!(parse("ORR").unwrap(), Some(t("ORR")));
        assert_eq!(
            parse("label:x ANDROID").unwrap(),
            Some(and(vec![t("label:x"), t("ANDROID")]))
        );
    }

    #[test]
    fn test_dangling_operators_fail() {
        assert_eq!(
            parse("AND label:x"),
            Err(SearchError::DanglingOperator {
                operator: "AND".to_string(),
                position: 0
            })
        );
        assert_eq!(
            parse("a AND OR b"),
            Err(SearchError::DanglingOperator {
                operator: "OR".to_string(),
                position: 6
            })
        );
        assert!(parse("a OR OR b").is_err());
    }

    #[test]
    fn test_unbalanced_parentheses_fail() {
        assert_eq!(
            parse("(a OR b"),
            Err(SearchError::UnbalancedParenthesis { position: 0 })
        );
        assert_eq!(
            parse("a OR b)"),
            Err(SearchError::UnbalancedParenthesis { position: 6 })
        );
        assert!(parse("()").is_err());
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let depth = operators::MAX_NESTING_DEPTH;
        let allowed = format!("{}web{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&allowed).unwrap(), Some(t("web")));

        let too_deep = format!("{}web{}", "(".repeat(depth + 1), ")".repeat(depth + 1));
        assert_eq!(
            parse(&too_deep),
            Err(SearchError::TooDeeplyNested { position: depth })
        );
    }

    #[test]
    fn test_runaway_open_parens_fail_cleanly() {
        assert_eq!(
            parse(&"(".repeat(10_000)),
            Err(SearchError::TooDeeplyNested {
                position: operators::MAX_NESTING_DEPTH
            })
        );
        assert!(parse(&format!("{}web", "(".repeat(2_000))).is_err());
    }

    #[test]
    fn test_unterminated_quote_fails() {
        assert_eq!(
            parse("label:\"my box"),
            Err(SearchError::UnterminatedQuote { position: 6 })
        );
    }

    #[test]
    fn test_node_count() {
        let tree = parse("a AND (b OR c)").unwrap().unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(t("a").node_count(), 1);
    }

    #[test]
    fn test_node_serializes_as_query_json() {
        let tree = parse("tags:my-app OR type:linode").unwrap().unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "or",
                "values": [
                    { "type": "string", "value": "tags:my-app" },
                    { "type": "string", "value": "type:linode" }
                ]
            })
        );
    }

    #[test]
    fn test_node_deserializes_from_query_json() {
        let node: Node = serde_json::from_str(
            r#"{"type":"and","values":[{"type":"string","value":"tag:a"},{"type":"string","value":"tag:b"}]}"#,
        )
        .unwrap();
        assert_eq!(node, and(vec![t("tag:a"), t("tag:b")]));
    }
}
