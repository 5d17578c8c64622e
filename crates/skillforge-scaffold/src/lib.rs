//! # skillforge-scaffold
//!
//! Turns a specification into a skill directory, and a skill directory into
//! an uploadable zip archive.

pub mod fs;
pub mod pack;
pub mod scaffold;
pub mod templates;

pub use fs::safe_join;
pub use pack::pack;
pub use scaffold::{ScaffoldOptions, ScaffoldReport, scaffold};
pub use templates::TemplateSet;
