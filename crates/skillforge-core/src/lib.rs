//! # skillforge-core
//!
//! Shared vocabulary for the skillforge workspace: the unified error type and
//! the in-memory form of a skill specification document.

pub mod error;
pub mod spec;

pub use error::{ForgeError, Result};
pub use spec::{SpecDocument, is_truthy};
