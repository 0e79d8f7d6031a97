use glob::Pattern;
use regex::Regex;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReplicateOptions {
    pub count: u32,
    pub prefix: String,
    pub suffix: String,
    pub output_dir: PathBuf,
}

impl ReplicateOptions {
    /// Output file name for a 1-based index, zero-padded to three digits.
    pub fn file_name(&self, index: u32) -> String {
        format!("{}{:03}{}", self.prefix, index, self.suffix)
    }
}

/// Options for a clean tree clone. `ignore` is matched against entry names.
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    pub ignore: Option<Pattern>,
}

/// Filters applied by a selective overlay pass.
#[derive(Debug, Clone, Default)]
pub struct OverlayOptions {
    /// Substrings of a directory path that put its files in scope.
    pub accept_dirs: Vec<String>,
    /// Directory names (or trailing path components) pruned from traversal.
    pub ignore_dirs: Vec<String>,
    /// File name patterns that are never copied or deleted.
    pub ignore_files: Vec<Regex>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneStats {
    pub dirs: usize,
    pub files: usize,
    pub excluded: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Files written to the destination, including replacements.
    pub copied: usize,
    /// Subset of `copied` that overwrote an existing file.
    pub replaced: usize,
    pub ignored_files: usize,
    /// Files skipped because their directory matched no accept entry.
    pub out_of_scope: usize,
    pub pruned_dirs: usize,
}

#[derive(Debug, Clone)]
pub struct ArchiveReport {
    pub archive: String,
    pub stats: OverlayStats,
}

#[derive(Debug, Clone)]
pub struct ComposeReport {
    pub clone: CloneStats,
    pub archives: Vec<ArchiveReport>,
}

impl ComposeReport {
    pub fn total_copied(&self) -> usize {
        self.archives.iter().map(|a| a.stats.copied).sum()
    }
}
