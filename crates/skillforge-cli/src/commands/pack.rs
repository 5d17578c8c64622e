use console::style;
use std::path::Path;

use skillforge_core::Result;

pub(super) fn cmd_pack(dir: &Path, out: &Path) -> Result<()> {
    println!("Packing skill from {}...", dir.display());
    let zip_path = skillforge_scaffold::pack(dir, out)?;
    println!("{} Skill packaged: {}", style("✓").green(), zip_path.display());
    Ok(())
}
