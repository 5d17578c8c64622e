use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::ForgeConfig;

/// Loads the skillforge configuration.
pub struct ConfigLoader {
    config: ForgeConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLFORGE_CONFIG env > ~/.skillforge/skillforge.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLFORGE_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillforge")
            .join("skillforge.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> skillforge_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            Self::parse(&raw, &config_path)?
        } else {
            if path.is_some() {
                warn!(?config_path, "config file not found, using defaults");
            }
            ForgeConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        // Validate config: log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(skillforge_core::ForgeError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    fn parse(raw: &str, config_path: &Path) -> skillforge_core::Result<ForgeConfig> {
        toml::from_str::<ForgeConfig>(raw).map_err(|e| {
            skillforge_core::ForgeError::Config(format!(
                "failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Get a copy of the loaded config.
    pub fn get(&self) -> ForgeConfig {
        self.config.clone()
    }

    /// Path the config was (or would have been) read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SKILLFORGE_TEMPLATES_DIR, SKILLFORGE_LOG_LEVEL).
    ///
    /// `SKILLS_DIR` is not folded in here: skills-directory detection treats it
    /// as a separate candidate ahead of `skills_dir`.
    fn apply_env_overrides(config: ForgeConfig) -> ForgeConfig {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(
        mut config: ForgeConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ForgeConfig {
        if let Some(v) = lookup("SKILLFORGE_TEMPLATES_DIR") {
            config.scaffold.templates_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SKILLFORGE_LOG_LEVEL") {
            config.logging.level = v;
        }
        config
    }
}
