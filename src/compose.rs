use log::info;
use crate::config::ComposeConfig;
use crate::domain::{ArchiveReport, ComposeReport};
use crate::error::{Error, Result};
use crate::fs::copy_clean_tree;
use crate::overlay::copy_over_tree;

/// Rebuilds `target_dir` from `base_dir`, then overlays each archive's
/// optimized subtree on top of it, in order.
///
/// All patterns are compiled and the base directory is checked before the
/// target is removed. A failure part way through leaves the target partially
/// composed.
pub fn compose(config: &ComposeConfig) -> Result<ComposeReport> {
    let clone_options = config.clone_options()?;
    let overlay_options = config.overlay_options()?;
    if !config.base_dir.is_dir() {
        return Err(Error::not_found(&config.base_dir));
    }

    info!(
        "Composing {} + {} -> {}",
        config.base_dir.display(),
        config.overlay_dir.display(),
        config.target_dir.display()
    );
    let clone = copy_clean_tree(&config.base_dir, &config.target_dir, &clone_options)?;

    let mut archives = Vec::with_capacity(config.archives.len());
    for archive in &config.archives {
        info!("Overlaying archive {archive}");
        let stats = copy_over_tree(
            &config.overlay_dir.join(archive),
            &config.target_dir.join(archive),
            &overlay_options,
        )?;
        archives.push(ArchiveReport {
            archive: archive.clone(),
            stats,
        });
    }

    let report = ComposeReport { clone, archives };
    info!(
        "Composed {} archives ({} optimized files applied)",
        report.archives.len(),
        report.total_copied()
    );
    Ok(report)
}
