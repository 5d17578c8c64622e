//! # skillforge-config
//!
//! Configuration for skillforge. Reads `skillforge.toml`, then environment
//! variables, then CLI overrides, in that precedence order.
//!
//! Also home to skills-directory detection, since it shares the same
//! env-then-config-then-home resolution.

pub mod loader;
pub mod schema;
pub mod skills_dir;

pub use loader::ConfigLoader;
pub use schema::{
    ConfigWarning, ForgeConfig, LoggingConfig, ScaffoldConfig, ValidationConfig, WarningSeverity,
};
pub use skills_dir::{detect_skills_dir, skills_dir_or_create};
