//! Selective overlay of one directory tree onto another.
//!
//! Files are copied from `src` to the same relative location under `dst`
//! when their directory is in scope, no ancestor directory is pruned, and
//! their name matches no ignore pattern. Everything else already in `dst`
//! is left alone.

use std::fs;
use std::path::Path;
use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};
use crate::domain::{OverlayOptions, OverlayStats};
use crate::error::{Error, IoContext, Result};
use crate::fs::copy_file;

impl OverlayOptions {
    /// A directory is in scope when any accept entry is a literal substring
    /// of its full path. The check is not component-aware.
    pub fn in_scope(&self, dir: &Path) -> bool {
        let dir = dir.to_string_lossy();
        self.accept_dirs.iter().any(|accept| dir.contains(accept.as_str()))
    }

    /// `relative` is the directory's path below the overlay root. An entry
    /// prunes it when the entry equals its trailing components, so both
    /// `magesguild` and `clutter/magesguild` prune `meshes/clutter/magesguild`.
    pub fn is_pruned(&self, relative: &Path) -> bool {
        self.ignore_dirs
            .iter()
            .any(|ignore| !ignore.is_empty() && relative.ends_with(ignore))
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.iter().any(|pattern| pattern.is_match(name))
    }
}

/// Copies the in-scope files of `src` over `dst`, replacing existing files.
///
/// Fails with [`Error::NotFound`] if `src` is missing. An I/O failure stops
/// the pass where it happened; files already written stay in place.
pub fn copy_over_tree(src: &Path, dst: &Path, options: &OverlayOptions) -> Result<OverlayStats> {
    if !src.is_dir() {
        return Err(Error::not_found(src));
    }
    if options.accept_dirs.is_empty() {
        warn!("No accepted directories given; nothing under {} will be copied", src.display());
    }

    let mut stats = OverlayStats::default();
    let mut pruned = 0;
    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !is_dir_like(entry) {
                return true;
            }
            let keep = !options.is_pruned(relative_to(src, entry));
            if !keep {
                debug!("Pruning {}", entry.path().display());
                pruned += 1;
            }
            keep
        });

    for entry in walker {
        let entry = entry?;
        let target = dst.join(relative_to(src, &entry));

        if entry.file_type().is_dir() {
            if options.in_scope(entry.path()) {
                fs::create_dir_all(&target).at(&target)?;
            }
            continue;
        }
        if is_dir_like(&entry) {
            // Links to directories are neither descended into nor copied.
            debug!("Skipping directory link {}", entry.path().display());
            continue;
        }

        let in_scope = entry.path().parent().is_some_and(|dir| options.in_scope(dir));
        if !in_scope {
            stats.out_of_scope += 1;
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if options.is_ignored_file(&name) {
            debug!("Ignoring {}", entry.path().display());
            stats.ignored_files += 1;
            continue;
        }

        if target.exists() {
            fs::remove_file(&target).at(&target)?;
            stats.replaced += 1;
        }
        copy_file(entry.path(), &target)?;
        stats.copied += 1;
    }
    stats.pruned_dirs = pruned;

    info!(
        "Overlaid {} -> {} ({} copied, {} replaced, {} ignored, {} out of scope, {} dirs pruned)",
        src.display(),
        dst.display(),
        stats.copied,
        stats.replaced,
        stats.ignored_files,
        stats.out_of_scope,
        stats.pruned_dirs
    );
    Ok(stats)
}

/// True for directories and for symlinks whose target is a directory.
fn is_dir_like(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn relative_to<'a>(root: &Path, entry: &'a DirEntry) -> &'a Path {
    entry.path().strip_prefix(root).unwrap_or(entry.path())
}
