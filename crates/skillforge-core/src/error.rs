use thiserror::Error;

/// Unified error type for the skillforge workspace.
#[derive(Error, Debug)]
pub enum ForgeError {
    // ── Specification errors ───────────────────────────────────
    #[error("Spec file not found: {0}")]
    SpecNotFound(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("spec has {} validation error(s)", .errors.len())]
    Validation { errors: Vec<String> },

    // ── Template errors ────────────────────────────────────────
    #[error("template '{template}' has unresolved markers: {}", .markers.join(", "))]
    Template {
        template: String,
        markers: Vec<String>,
    },

    // ── Scaffolding / packaging errors ─────────────────────────
    #[error("unsafe path: {0}")]
    UnsafePath(String),

    #[error("Skill directory not found: {0}")]
    SkillDirNotFound(String),

    #[error("packaging failed: {0}")]
    Pack(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
