//! # skillforge-template
//!
//! The template language used to scaffold skills. It has exactly two markers:
//!
//! - `{{ a.b.c }}`: interpolate a value found by walking object keys.
//! - `{% for item in a.b %} ... {% endfor %}`: repeat the body once per
//!   array element, with `item` and `loop.index` / `loop.index0` in scope.
//!   The opening tag may also be closed with `-%}`.
//!
//! Rendering never fails: anything that does not resolve becomes empty text,
//! and markers that cannot be interpreted are left in the output verbatim.
//! [`Template::render_strict`] is the opt-in variant that reports both.
//!
//! Loops do not nest. Inside a loop body a `{% for %}` tag is plain text, and
//! the first `{% endfor %}` after an opening tag always closes it.
//!
//! ```
//! use serde_json::json;
//!
//! let out = skillforge_template::render(
//!     "{% for x in items %}{{ loop.index }}:{{ x }} {% endfor %}",
//!     &json!({"items": ["p", "q"]}),
//! );
//! assert_eq!(out, "1:p 2:q ");
//! ```

mod parser;
mod render;

pub use render::{Template, value_to_text};

/// Render `template` against `context`. Total and deterministic.
pub fn render(template: &str, context: &serde_json::Value) -> String {
    Template::parse(template).render(context)
}
