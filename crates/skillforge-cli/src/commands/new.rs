use console::style;
use std::path::{Path, PathBuf};

use skillforge_config::ForgeConfig;
use skillforge_core::{ForgeError, Result};
use skillforge_scaffold::{ScaffoldOptions, TemplateSet, scaffold};
use skillforge_validate::ValidatorRegistry;

pub(super) fn cmd_new(
    config: &ForgeConfig,
    spec: &Path,
    out: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    let out = out.unwrap_or_else(|| config.scaffold.out_dir.clone());
    let templates = TemplateSet::from_dir(config.scaffold.templates_dir.as_deref())?;
    let options = ScaffoldOptions {
        strict: strict || config.scaffold.strict,
        max_skill_lines: config.validation.max_skill_lines,
        registry: ValidatorRegistry::builtin(),
    };

    println!("Creating new skill from {}...", spec.display());
    let report = match scaffold(spec, &out, &templates, &options) {
        Ok(report) => report,
        Err(ForgeError::Validation { errors }) => {
            super::validate::print_errors(&errors);
            return Err(ForgeError::Validation { errors });
        }
        Err(e) => return Err(e),
    };

    println!(
        "{} Skill created at: {}",
        style("✓").green(),
        report.skill_dir.display()
    );
    for file in &report.files {
        println!("  {}", file.display());
    }
    if !report.findings.is_empty() {
        println!("\nRendered output notes:");
        for finding in &report.findings {
            println!("  {} {}", style("⚠️ ").yellow(), finding);
        }
    }
    Ok(())
}
