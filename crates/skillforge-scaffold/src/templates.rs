use skillforge_core::Result;
use skillforge_template::Template;
use std::path::Path;
use tracing::{debug, info};

pub const SKILL_MD: &str = "skill_md.tmpl";
pub const OUTPUT_CONTRACT: &str = "output_contract.tmpl";
pub const CODE_STUB: &str = "code_stub.tmpl";
pub const README: &str = "README.tmpl";

const EMBEDDED: [(&str, &str); 4] = [
    (SKILL_MD, include_str!("../templates/skill_md.tmpl")),
    (OUTPUT_CONTRACT, include_str!("../templates/output_contract.tmpl")),
    (CODE_STUB, include_str!("../templates/code_stub.tmpl")),
    (README, include_str!("../templates/README.tmpl")),
];

/// The four templates a skill is scaffolded from.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub skill_md: Template,
    pub output_contract: Template,
    pub code_stub: Template,
    pub readme: Template,
}

impl TemplateSet {
    /// Templates compiled into the binary.
    pub fn embedded() -> Self {
        let [skill_md, output_contract, code_stub, readme] =
            EMBEDDED.map(|(name, src)| Template::parse(src).with_name(name));
        Self {
            skill_md,
            output_contract,
            code_stub,
            readme,
        }
    }

    /// Read templates from `dir`. A file missing from the directory falls
    /// back to its embedded default.
    pub fn load(dir: &Path) -> Result<Self> {
        let [skill_md, output_contract, code_stub, readme] = EMBEDDED;
        Ok(Self {
            skill_md: read_or_default(dir, skill_md)?,
            output_contract: read_or_default(dir, output_contract)?,
            code_stub: read_or_default(dir, code_stub)?,
            readme: read_or_default(dir, readme)?,
        })
    }

    /// [`Self::load`] when a directory is configured, otherwise the embedded set.
    pub fn from_dir(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::embedded()),
        }
    }
}

fn read_or_default(dir: &Path, (name, default): (&str, &str)) -> Result<Template> {
    let path = dir.join(name);
    let template = match std::fs::read_to_string(&path) {
        Ok(src) => {
            debug!(path = ?path, "loaded template override");
            Template::parse(&src)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(template = name, dir = ?dir, "template not overridden, using default");
            Template::parse(default)
        }
        Err(e) => return Err(e.into()),
    };
    Ok(template.with_name(name))
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_templates_are_named() {
        let set = TemplateSet::embedded();
        assert_eq!(set.skill_md.name(), SKILL_MD);
        assert_eq!(set.output_contract.name(), OUTPUT_CONTRACT);
        assert_eq!(set.code_stub.name(), CODE_STUB);
        assert_eq!(set.readme.name(), README);
    }

    #[test]
    fn load_overrides_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(README), "custom {{ name }}").unwrap();

        let set = TemplateSet::load(dir.path()).unwrap();
        assert_eq!(set.readme.render(&json!({"name": "X"})), "custom X");

        let title = set.output_contract.render(&json!({"title": "T", "sections": []}));
        assert!(title.starts_with("# T\n"));
    }
}
