//! Tokenizer and AST for the template language.
//!
//! Lexing splits the source at `{{ }}` and `{% %}` boundaries; parsing pairs
//! each `{% for %}` with the first `{% endfor %}` that follows it.

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// Plain text, copied to the output.
    Text(String),
    /// `{{ path }}`.
    Var { path: Vec<String>, raw: String },
    /// `{% for item in path %} body {% endfor %}`.
    Loop {
        item: String,
        path: Vec<String>,
        body: Vec<Node>,
    },
    /// Marker text that could not be interpreted. Rendered verbatim.
    Stray(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Var { path: Vec<String>, raw: String },
    For {
        item: String,
        path: Vec<String>,
        raw: String,
    },
    EndFor(String),
    Stray(String),
}

const VAR_OPEN: &str = "{{";
const VAR_CLOSE: &str = "}}";
const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

/// Parse template source into nodes. Never fails.
pub(crate) fn parse(src: &str) -> Vec<Node> {
    let tokens = lex(src);
    let mut nodes = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::For { item, path, raw } => {
                let close = tokens[i + 1..]
                    .iter()
                    .position(|t| matches!(t, Token::EndFor(_)))
                    .map(|offset| i + 1 + offset);

                match close {
                    Some(end) => {
                        let body = tokens[i + 1..end].iter().map(flat_node).collect();
                        nodes.push(Node::Loop {
                            item: item.clone(),
                            path: path.clone(),
                            body,
                        });
                        i = end + 1;
                    }
                    None => {
                        nodes.push(Node::Stray(raw.clone()));
                        i += 1;
                    }
                }
            }
            other => {
                nodes.push(flat_node(other));
                i += 1;
            }
        }
    }

    merge_text(nodes)
}

/// Node for a token outside of loop pairing: block tags become plain text.
fn flat_node(token: &Token) -> Node {
    match token {
        Token::Text(t) => Node::Text(t.clone()),
        Token::Var { path, raw } => Node::Var {
            path: path.clone(),
            raw: raw.clone(),
        },
        Token::For { raw, .. } | Token::EndFor(raw) | Token::Stray(raw) => Node::Stray(raw.clone()),
    }
}

fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &node) {
            prev.push_str(next);
            continue;
        }
        merged.push(node);
    }
    merged
}

fn lex(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < src.len() {
        let Some(start) = next_open(src, pos) else {
            text.push_str(&src[pos..]);
            break;
        };
        text.push_str(&src[pos..start]);

        let (token, next) = if src[start..].starts_with(VAR_OPEN) {
            lex_var(src, start)
        } else {
            lex_tag(src, start)
        };

        match token {
            Token::Text(t) => text.push_str(&t),
            token => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(token);
            }
        }
        pos = next;
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}

fn next_open(src: &str, from: usize) -> Option<usize> {
    let var = src[from..].find(VAR_OPEN);
    let tag = src[from..].find(TAG_OPEN);
    match (var, tag) {
        (Some(v), Some(t)) => Some(from + v.min(t)),
        (Some(v), None) => Some(from + v),
        (None, Some(t)) => Some(from + t),
        (None, None) => None,
    }
}

/// Lex a `{{ ... }}` marker starting at `start`. Returns the token and the
/// position to resume scanning from.
fn lex_var(src: &str, start: usize) -> (Token, usize) {
    let inner_start = start + VAR_OPEN.len();
    let stray = (Token::Stray(VAR_OPEN.to_string()), inner_start);

    let Some(len) = src[inner_start..].find(VAR_CLOSE) else {
        return stray;
    };
    let inner = &src[inner_start..inner_start + len];
    let name = inner.trim();
    if name.is_empty() || inner.contains('}') {
        return stray;
    }

    let end = inner_start + len + VAR_CLOSE.len();
    let token = Token::Var {
        path: name.split('.').map(str::to_string).collect(),
        raw: src[start..end].to_string(),
    };
    (token, end)
}

/// Lex a `{% ... %}` tag starting at `start`.
fn lex_tag(src: &str, start: usize) -> (Token, usize) {
    let inner_start = start + TAG_OPEN.len();

    let Some(len) = src[inner_start..].find(TAG_CLOSE) else {
        return (Token::Stray(TAG_OPEN.to_string()), inner_start);
    };
    let inner = &src[inner_start..inner_start + len];
    let end = inner_start + len + TAG_CLOSE.len();
    let raw = src[start..end].to_string();

    if inner.trim() == "endfor" {
        return (Token::EndFor(raw), end);
    }
    if let Some((item, path)) = parse_for(inner) {
        return (Token::For { item, path, raw }, end);
    }
    if inner.contains(VAR_OPEN) || inner.contains(TAG_OPEN) {
        // Let a marker inside an unknown tag still be lexed.
        return (Token::Stray(TAG_OPEN.to_string()), inner_start);
    }
    (Token::Stray(raw), end)
}

/// Parse `for <ident> in <ident>(.<ident>)*`, optionally followed by `-`.
fn parse_for(inner: &str) -> Option<(String, Vec<String>)> {
    let trimmed = inner.trim();
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);

    let mut words = trimmed.split_whitespace();
    let (Some("for"), Some(item), Some("in"), Some(path), None) = (
        words.next(),
        words.next(),
        words.next(),
        words.next(),
        words.next(),
    ) else {
        return None;
    };

    if !is_ident(item) {
        return None;
    }
    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
    if !segments.iter().all(|s| is_ident(s)) {
        return None;
    }
    Some((item.to_string(), segments))
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}
