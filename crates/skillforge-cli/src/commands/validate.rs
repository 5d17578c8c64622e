use console::style;
use std::path::Path;

use skillforge_config::ForgeConfig;
use skillforge_core::{ForgeError, Result};
use skillforge_validate::{ValidationReport, ValidatorRegistry, validate_spec_file};

pub(super) fn cmd_validate(config: &ForgeConfig, spec: &Path, json: bool) -> Result<()> {
    let registry = ValidatorRegistry::builtin();
    let report = validate_spec_file(spec, &registry, config.validation.best_practices);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validating spec: {}...", spec.display());
        print_report(&report, config.validation.best_practices);
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(ForgeError::Validation {
            errors: report.errors,
        })
    }
}

fn print_report(report: &ValidationReport, best_practices: bool) {
    if !report.is_valid() {
        print_errors(&report.errors);
        return;
    }

    println!("{} Spec is valid!", style("✓").green());
    if !best_practices {
        return;
    }
    if report.warnings.is_empty() {
        println!("{} No best practice issues found!", style("✓").green());
        return;
    }

    println!("\nBest practice suggestions:");
    for warning in &report.warnings {
        println!("  {warning}");
    }
    println!("\nNote: These are suggestions, not errors. The spec is valid.");
}

pub(super) fn print_errors(errors: &[String]) {
    println!("{} Validation failed:", style("✗").red());
    for error in errors {
        println!("  - {error}");
    }
}
