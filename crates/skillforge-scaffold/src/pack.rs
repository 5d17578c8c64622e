use anyhow::Context;
use skillforge_core::{ForgeError, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write every regular file under `dir` into a deflate zip at `out`.
///
/// Entry names are relative to `dir` with `/` separators, so the archive has
/// no wrapping folder. Files are added in sorted path order.
pub fn pack(dir: &Path, out: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ForgeError::SkillDirNotFound(dir.display().to_string()));
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(out)?;
    // The archive may be written inside the directory being packed.
    let out_abs = out.canonicalize()?;
    let dir_abs = dir.canonicalize()?;

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = 0usize;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| ForgeError::Pack(e.to_string()))?;
        if dir_abs.join(relative) == out_abs {
            continue;
        }

        let name = archive_name(relative);
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ForgeError::Pack(e.to_string()))?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
        debug!(entry = %name, "added to archive");
        entries += 1;
    }

    writer.finish().map_err(|e| ForgeError::Pack(e.to_string()))?;
    info!(dir = ?dir, out = ?out, entries, "skill packaged");
    Ok(out.to_path_buf())
}

fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_names_use_forward_slashes() {
        let relative: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(archive_name(&relative), "a/b/c.txt");
    }

    #[test]
    fn missing_dir_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let err = pack(&tmp.path().join("nope"), &tmp.path().join("x.zip")).unwrap_err();
        assert!(err.to_string().starts_with("Skill directory not found:"));
    }
}
