use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use console::style;
use std::path::{Path, PathBuf};

use skillforge_config::{ConfigLoader, ForgeConfig, LoggingConfig};
use skillforge_core::{ForgeError, Result};

mod new;
mod pack;
mod validate;

/// Scaffold, validate, and package skill specifications
#[derive(Parser)]
#[command(name = "skillforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillforge.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new skill from a spec
    New {
        /// Path to skill.spec.json
        #[arg(long)]
        spec: PathBuf,
        /// Output directory (default: scaffold.out_dir from config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail if a template references a value the spec does not have
        #[arg(long)]
        strict: bool,
    },
    /// Validate a skill spec
    Validate {
        /// Path to skill.spec.json
        #[arg(long)]
        spec: PathBuf,
        /// Print the validation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Package a skill directory into a .zip
    Pack {
        /// Skill directory to pack
        #[arg(long)]
        dir: PathBuf,
        /// Output .zip file path
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the skills directory
    SkillsDir {
        /// Create ~/skills if no skills directory exists yet
        #[arg(long)]
        create: bool,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        let log_level = resolve_log_level(
            self.verbose,
            self.quiet,
            self.log_level.as_deref(),
            &config.logging,
        );
        init_tracing(log_level, &config.logging.format);

        match self.command {
            Commands::New { spec, out, strict } => new::cmd_new(&config, &spec, out, strict),
            Commands::Validate { spec, json } => validate::cmd_validate(&config, &spec, json),
            Commands::Pack { dir, out } => pack::cmd_pack(&dir, &out),
            Commands::SkillsDir { create } => Self::cmd_skills_dir(&config, create),
            Commands::Config { json } => Self::cmd_config(&config, config_loader.path(), json),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_skills_dir(config: &ForgeConfig, create: bool) -> Result<()> {
        let dir = if create {
            skillforge_config::skills_dir_or_create(config)?
        } else {
            skillforge_config::detect_skills_dir(config).ok_or_else(|| {
                ForgeError::Config(
                    "no skills directory found (set SKILLS_DIR or run `skillforge skills-dir --create`)"
                        .into(),
                )
            })?
        };
        println!("{}", dir.display());
        Ok(())
    }

    fn cmd_config(config: &ForgeConfig, path: &Path, json: bool) -> Result<()> {
        eprintln!("{}", style(config_source(path)).dim());
        if json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(config).map_err(|e| ForgeError::Config(e.to_string()))?
            );
        }
        if let Ok(warnings) = config.validate() {
            for w in &warnings {
                eprintln!("{}", style(w).yellow());
            }
        }
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "skillforge", &mut std::io::stdout());
        Ok(())
    }
}

/// Header line naming where the shown config came from.
fn config_source(path: &Path) -> String {
    if path.exists() {
        format!("# Config file: {}", path.display())
    } else {
        format!("# Config file: {} (not found, using defaults)", path.display())
    }
}

/// Resolve log level: --verbose > --quiet > --log-level > config
fn resolve_log_level<'a>(
    verbose: bool,
    quiet: bool,
    flag: Option<&'a str>,
    logging: &'a LoggingConfig,
) -> &'a str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        flag.unwrap_or(&logging.level)
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries command output.
fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = match format {
        "json" => builder.json().with_target(true).try_init(),
        "compact" => builder.compact().with_target(false).try_init(),
        _ => builder.with_target(false).try_init(),
    };
}
