//! # skillforge-validate
//!
//! Validation for skill specifications, in two tiers:
//!
//! 1. **Structural errors** ([`validate_structure`]): schema violations that
//!    make a spec unusable. Every check runs; all messages are returned.
//! 2. **Best-practice warnings** ([`validate_best_practices`]): advisory
//!    findings, only computed once the structure is clean.
//!
//! Callers can add their own checks through a [`ValidatorRegistry`], which is
//! a plain value built per call site rather than global state.

pub mod pipeline;
pub mod practices;
pub mod registry;
pub mod rendered;
pub mod structure;

pub use pipeline::{ValidationReport, validate_document, validate_spec_file};
pub use practices::{Category, PracticeWarning, validate_best_practices};
pub use registry::{SpecValidator, ValidatorRegistry};
pub use rendered::check_rendered;
pub use structure::{REQUIRED_FIELDS, validate_structure};
