use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration. Maps to `skillforge.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub scaffold: ScaffoldConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
    /// Where the user keeps installed skills. Falls back to `~/skills`.
    pub skills_dir: Option<PathBuf>,
}

// ── Scaffold ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Default output directory for `skillforge new`.
    pub out_dir: PathBuf,
    /// Directory holding `skill_md.tmpl`, `output_contract.tmpl`,
    /// `code_stub.tmpl` and `README.tmpl`. Embedded templates are used when unset.
    pub templates_dir: Option<PathBuf>,
    /// Fail scaffolding when a rendered file still contains template markers.
    pub strict: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dist"),
            templates_dir: None,
            strict: false,
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum line count for a rendered skill definition before it is flagged.
    pub max_skill_lines: usize,
    /// Run best-practice checks after a clean structural validation.
    pub best_practices: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_skill_lines: 500,
            best_practices: true,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty", "json", or "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl ForgeConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        // ── Line limit ───
        if self.validation.max_skill_lines == 0 {
            warnings.push(ConfigWarning {
                field: "validation.max_skill_lines".into(),
                message: "line limit is 0, every rendered skill would be flagged".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 500".into()),
            });
        }

        // ── Output directory ───
        if self.scaffold.out_dir.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                field: "scaffold.out_dir".into(),
                message: "output directory is empty".into(),
                severity: WarningSeverity::Error,
                hint: Some("Set to e.g. 'dist'".into()),
            });
        }

        // ── Templates directory ───
        if let Some(ref dir) = self.scaffold.templates_dir {
            if !dir.is_dir() {
                warnings.push(ConfigWarning {
                    field: "scaffold.templates_dir".into(),
                    message: format!("'{}' is not a directory", dir.display()),
                    severity: WarningSeverity::Warning,
                    hint: Some("Embedded templates are used until the directory exists".into()),
                });
            }
        }

        // ── Logging format ───
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        // ── Logging level ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }
}
