//! Locating the user's skills directory.
//!
//! Priority: `SKILLS_DIR` (when it names an existing directory), then the
//! configured `skills_dir` (same condition), then `~/skills` (when it exists).

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::schema::ForgeConfig;

/// Detect an existing skills directory. Returns `None` if none exists yet.
pub fn detect_skills_dir(config: &ForgeConfig) -> Option<PathBuf> {
    let home = dirs::home_dir();
    let from_env = std::env::var("SKILLS_DIR")
        .ok()
        .map(|v| expand_home(&v, home.as_deref()));
    let candidates: Vec<&Path> = from_env
        .as_deref()
        .into_iter()
        .chain(config.skills_dir.as_deref())
        .collect();
    detect_in(&candidates, home.as_deref())
}

/// Detect the skills directory, creating `~/skills` when nothing was found.
pub fn skills_dir_or_create(config: &ForgeConfig) -> skillforge_core::Result<PathBuf> {
    if let Some(dir) = detect_skills_dir(config) {
        return Ok(dir);
    }
    let home = dirs::home_dir().ok_or_else(|| {
        skillforge_core::ForgeError::Config("cannot determine home directory".into())
    })?;
    let dir = home.join("skills");
    std::fs::create_dir_all(&dir)?;
    info!(?dir, "created skills directory");
    Ok(dir)
}

/// Expand a leading `~` to the home directory.
fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(raw),
    }
}

fn detect_in(candidates: &[&Path], home: Option<&Path>) -> Option<PathBuf> {
    for dir in candidates {
        if dir.is_dir() {
            return Some(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));
        }
        debug!(?dir, "skills directory candidate does not exist, ignoring");
    }

    let home_skills = home?.join("skills");
    home_skills.is_dir().then_some(home_skills)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_existing_candidate_wins() {
        let configured = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("skills")).unwrap();

        let found = detect_in(&[configured.path()], Some(home.path())).unwrap();
        assert_eq!(found, configured.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_env_dir_does_not_hide_configured_dir() {
        let configured = tempfile::tempdir().unwrap();
        let candidates = [Path::new("/nonexistent/xyz"), configured.path()];

        let found = detect_in(&candidates, None).unwrap();
        assert_eq!(found, configured.path().canonicalize().unwrap());
    }

    #[test]
    fn env_dir_beats_configured_dir() {
        let from_env = tempfile::tempdir().unwrap();
        let configured = tempfile::tempdir().unwrap();

        let found = detect_in(&[from_env.path(), configured.path()], None).unwrap();
        assert_eq!(found, from_env.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_candidates_fall_back_to_home() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("skills")).unwrap();

        let found = detect_in(&[Path::new("/nonexistent/skills")], Some(home.path()));
        assert_eq!(found, Some(home.path().join("skills")));
    }

    #[test]
    fn nothing_found() {
        let home = tempfile::tempdir().unwrap();
        assert!(detect_in(&[], Some(home.path())).is_none());
        assert!(detect_in(&[], None).is_none());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/ada"));
        assert_eq!(expand_home("~/skills", Some(home)), PathBuf::from("/home/ada/skills"));
        assert_eq!(expand_home("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_home("/srv/skills", Some(home)), PathBuf::from("/srv/skills"));
        assert_eq!(expand_home("~/skills", None), PathBuf::from("~/skills"));
    }
}
