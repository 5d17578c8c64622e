//! # skillforge-cli
//!
//! Command-line interface for skillforge.
//!
//! ## Commands
//!
//! - `skillforge new`: scaffold a skill directory from a spec
//! - `skillforge validate`: check a spec and suggest best practices
//! - `skillforge pack`: zip a skill directory for upload
//! - `skillforge skills-dir`: locate (or create) the skills directory
//! - `skillforge config`: show the effective configuration
//! - `skillforge completions`: generate shell completions

pub mod commands;

pub use commands::Cli;
