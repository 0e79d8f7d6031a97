use std::fs;
use std::path::Path;
use log::{debug, info};
use walkdir::WalkDir;
use crate::domain::{CloneOptions, CloneStats};
use crate::error::{Error, IoContext, Result};

/// Removes whatever sits at `path`, directory or file. Missing is fine.
pub fn remove_existing(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).at(path),
    };
    info!("Cleaning output directory: {}", path.display());
    if metadata.is_dir() {
        fs::remove_dir_all(path).at(path)
    } else {
        fs::remove_file(path).at(path)
    }
}

/// Copies one file, creating its parent directories first.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }
    debug!("Copying {} -> {}", src.display(), dst.display());
    fs::copy(src, dst).at(dst)?;
    Ok(())
}

/// Replaces `dst` with a full recursive copy of `src`.
///
/// The destination is removed wholesale before copying; there is no backup.
/// When `options.ignore` is set, any entry whose name matches it is left out,
/// and matching directories are not descended into.
pub fn copy_clean_tree(src: &Path, dst: &Path, options: &CloneOptions) -> Result<CloneStats> {
    if !src.exists() {
        return Err(Error::not_found(src));
    }
    remove_existing(dst)?;

    let mut stats = CloneStats::default();
    let mut excluded_count = 0;
    let walker = WalkDir::new(src)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let excluded = is_excluded(options, entry.file_name());
            if excluded {
                debug!("Excluding {}", entry.path().display());
                excluded_count += 1;
            }
            !excluded
        });

    for entry in walker {
        let entry = entry?;
        // Root-relative; `strip_prefix` cannot fail for entries under `src`.
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
            stats.dirs += 1;
        } else {
            fs::copy(entry.path(), &target).at(&target)?;
            stats.files += 1;
        }
    }
    stats.excluded = excluded_count;

    info!(
        "Cloned {} -> {} ({} files, {} dirs, {} excluded)",
        src.display(),
        dst.display(),
        stats.files,
        stats.dirs,
        stats.excluded
    );
    Ok(stats)
}

fn is_excluded(options: &CloneOptions, name: &std::ffi::OsStr) -> bool {
    match (&options.ignore, name.to_str()) {
        (Some(pattern), Some(name)) => pattern.matches(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glob::Pattern;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn list(root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_clone_copies_whole_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("extracted");
        let dst = temp.path().join("composed");
        write(&src, "Knights.bsa/meshes/a.nif", "a");
        write(&src, "Knights.bsa/textures/b.dds", "b");
        fs::create_dir_all(src.join("empty")).unwrap();

        let stats = copy_clean_tree(&src, &dst, &CloneOptions::default()).unwrap();

        assert_eq!(stats.files, 2);
        assert!(dst.join("empty").is_dir());
        assert_eq!(list(&src), list(&dst));
        assert_eq!(
            fs::read_to_string(dst.join("Knights.bsa/meshes/a.nif")).unwrap(),
            "a"
        );
    }

    #[test]
    fn test_clone_is_idempotent_and_drops_stale_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        write(&src, "x/one.nif", "1");

        copy_clean_tree(&src, &dst, &CloneOptions::default()).unwrap();
        let first = list(&dst);
        write(&dst, "stale.nif", "old");
        write(&dst, "x/one.nif", "tampered");

        copy_clean_tree(&src, &dst, &CloneOptions::default()).unwrap();

        assert_eq!(list(&dst), first);
        assert_eq!(fs::read_to_string(dst.join("x/one.nif")).unwrap(), "1");
    }

    #[test]
    fn test_clone_missing_source_leaves_destination() {
        let temp = TempDir::new().unwrap();
        let dst = temp.path().join("dst");
        write(&dst, "keep.nif", "k");

        let err = copy_clean_tree(&temp.path().join("nope"), &dst, &CloneOptions::default())
            .unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert!(dst.join("keep.nif").exists());
    }

    #[test]
    fn test_clone_ignore_pattern_excludes_files_and_dirs() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        write(&src, "meshes/a.nif", "a");
        write(&src, "meshes/a_far.nif", "far");
        write(&src, "skip_far.nif/inner.nif", "inner");

        let options = CloneOptions {
            ignore: Some(Pattern::new("*_far.nif").unwrap()),
        };
        let stats = copy_clean_tree(&src, &dst, &options).unwrap();

        assert_eq!(list(&dst), vec![PathBuf::from("meshes/a.nif")]);
        assert_eq!(stats.excluded, 2);
    }

    #[test]
    fn test_remove_existing_handles_file_and_missing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();

        remove_existing(&file).unwrap();
        assert!(!file.exists());
        remove_existing(&file).unwrap();
    }
}
