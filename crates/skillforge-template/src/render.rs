use serde_json::{Value, json};
use skillforge_core::{ForgeError, Result};
use std::collections::HashSet;
use tracing::debug;

use crate::parser::{self, Node};

/// A parsed template, ready to render against any number of contexts.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

/// Names visible while rendering one node.
///
/// The loop item and `loop` metadata shadow top-level context keys for the
/// duration of a single iteration. The context itself is only ever borrowed.
#[derive(Clone, Copy)]
struct Scope<'a> {
    root: &'a Value,
    item: Option<(&'a str, &'a Value)>,
    meta: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    fn lookup(&self, path: &[String]) -> Option<&'a Value> {
        let (first, rest) = path.split_first()?;
        let start = match (self.meta, self.item) {
            (Some(meta), _) if first == "loop" => meta,
            (_, Some((name, value))) if first == name => value,
            _ => self.root.as_object()?.get(first)?,
        };
        rest.iter()
            .try_fold(start, |current, key| current.as_object()?.get(key))
    }
}

impl Template {
    /// Parse template source. Malformed markers are kept as literal text.
    pub fn parse(src: &str) -> Self {
        Self {
            name: "<inline>".into(),
            nodes: parser::parse(src),
        }
    }

    /// Attach a name used in strict-mode errors.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against `context`. Missing values become empty text.
    pub fn render(&self, context: &Value) -> String {
        let mut out = String::new();
        let mut unresolved = Vec::new();
        render_nodes(&self.nodes, root_scope(context), &mut out, &mut unresolved);
        if !unresolved.is_empty() {
            debug!(template = %self.name, count = unresolved.len(), "template rendered with unresolved markers");
        }
        out
    }

    /// Render against `context`, failing if any variable did not resolve or any
    /// marker was left in the output as literal text.
    ///
    /// A loop over a missing path renders nothing in both modes, so optional
    /// lists can be iterated without tripping strict mode.
    pub fn render_strict(&self, context: &Value) -> Result<String> {
        let mut out = String::new();
        let mut unresolved = Vec::new();
        render_nodes(&self.nodes, root_scope(context), &mut out, &mut unresolved);
        if unresolved.is_empty() {
            return Ok(out);
        }
        let mut seen = HashSet::new();
        unresolved.retain(|marker| seen.insert(marker.clone()));
        Err(ForgeError::Template {
            template: self.name.clone(),
            markers: unresolved,
        })
    }
}

fn root_scope(context: &Value) -> Scope<'_> {
    Scope {
        root: context,
        item: None,
        meta: None,
    }
}

fn render_nodes(nodes: &[Node], scope: Scope<'_>, out: &mut String, unresolved: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Stray(text) => {
                out.push_str(text);
                unresolved.push(text.clone());
            }
            Node::Var { path, raw } => match scope.lookup(path) {
                Some(value) => out.push_str(&value_to_text(value)),
                None => unresolved.push(raw.clone()),
            },
            Node::Loop { item, path, body } => {
                let items: &[Value] = match scope.lookup(path) {
                    Some(Value::Array(items)) => items.as_slice(),
                    _ => &[],
                };
                for (i, element) in items.iter().enumerate() {
                    let meta = json!({ "index": i + 1, "index0": i });
                    let iteration = Scope {
                        root: scope.root,
                        item: Some((item.as_str(), element)),
                        meta: Some(&meta),
                    };
                    render_nodes(body, iteration, out, unresolved);
                }
            }
        }
    }
}

/// Canonical text form of a context value: strings verbatim, `null` empty,
/// everything else as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
