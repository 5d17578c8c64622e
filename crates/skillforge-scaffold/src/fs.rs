use skillforge_core::{ForgeError, Result};
use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `base`, refusing anything that could land outside it.
///
/// The check is lexical: absolute paths, drive prefixes and `..` components
/// are rejected, so it works for paths that do not exist yet.
pub fn safe_join(base: &Path, relative: &str) -> Result<PathBuf> {
    let candidate = Path::new(relative);
    let mut joined = base.to_path_buf();
    let mut depth = 0usize;

    for component in candidate.components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ForgeError::UnsafePath(format!(
                    "{relative} is outside {}",
                    base.display()
                )));
            }
        }
    }

    if depth == 0 {
        return Err(ForgeError::UnsafePath(format!(
            "{relative:?} does not name anything inside {}",
            base.display()
        )));
    }
    Ok(joined)
}
