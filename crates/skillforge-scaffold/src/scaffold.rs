use serde::Serialize;
use serde_json::Value;
use skillforge_core::{ForgeError, Result, SpecDocument};
use skillforge_template::Template;
use skillforge_validate::{ValidatorRegistry, check_rendered, validate_document};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::fs::safe_join;
use crate::templates::TemplateSet;

/// Knobs for [`scaffold`].
pub struct ScaffoldOptions {
    /// Fail on unresolved template markers instead of rendering them empty.
    pub strict: bool,
    /// Length limit applied to the rendered `skill.md`.
    pub max_skill_lines: usize,
    /// Validators run after the structural checks.
    pub registry: ValidatorRegistry,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_skill_lines: 500,
            registry: ValidatorRegistry::builtin(),
        }
    }
}

/// What [`scaffold`] produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub skill_dir: PathBuf,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
    /// Problems found in the rendered `skill.md`. Advisory.
    pub findings: Vec<String>,
}

/// Create a skill directory under `out_dir` from the spec at `spec_path`.
///
/// The spec must pass validation first; nothing is written otherwise.
pub fn scaffold(
    spec_path: &Path,
    out_dir: &Path,
    templates: &TemplateSet,
    options: &ScaffoldOptions,
) -> Result<ScaffoldReport> {
    let doc = SpecDocument::from_file(spec_path)?;

    let report = validate_document(doc.value(), &options.registry, false);
    if !report.is_valid() {
        return Err(ForgeError::Validation {
            errors: report.errors,
        });
    }

    let slug = doc.slug().ok_or_else(|| ForgeError::Validation {
        errors: vec!["Field 'name' must be a string".into()],
    })?;
    let skill_dir = safe_join(out_dir, &slug)?;

    let render = |template: &Template, context: &Value| -> Result<String> {
        if options.strict {
            template.render_strict(context)
        } else {
            Ok(template.render(context))
        }
    };
    let spec = doc.value();

    // Render everything first so a strict failure leaves no partial skill.
    let skill_md = render(&templates.skill_md, spec)?;
    let null = Value::Null;
    let contract = doc.output_contract().unwrap_or(&null);
    let mut outputs = vec![
        ("skill.md", skill_md.clone()),
        (
            "templates/output_doc.tmpl",
            render(&templates.output_contract, contract)?,
        ),
    ];
    if doc.code_helper_enabled() {
        outputs.push(("code/helper.py", render(&templates.code_stub, spec)?));
    }
    outputs.push(("README.md", render(&templates.readme, spec)?));

    std::fs::create_dir_all(&skill_dir)?;
    info!(skill = %slug, dir = ?skill_dir, "scaffolding skill");

    let mut files = Vec::with_capacity(outputs.len());
    for (relative, content) in &outputs {
        files.push(write_file(&skill_dir, relative, content)?);
    }

    let findings = check_rendered(&skill_md, options.max_skill_lines);
    for finding in &findings {
        warn!(skill = %slug, "{finding}");
    }

    info!(skill = %slug, files = files.len(), "skill scaffolded");
    Ok(ScaffoldReport {
        skill_dir,
        files,
        findings,
    })
}

fn write_file(skill_dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let path = safe_join(skill_dir, relative)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    debug!(path = ?path, bytes = content.len(), "wrote file");
    Ok(path)
}
