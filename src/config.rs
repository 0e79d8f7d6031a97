//! Composition settings.
//!
//! A [`ComposeConfig`] is built from YAML (or from the built-in defaults)
//! and validated in full before any operation touches the filesystem.
//! Unknown keys are rejected at parse time.

use std::fs;
use std::path::{Path, PathBuf};
use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use crate::domain::{CloneOptions, OverlayOptions};
use crate::error::{Error, IoContext, Result};

pub const DEFAULT_ARCHIVES: &[&str] = &[
    "DLCBattlehornCastle.bsa",
    "DLCFrostcrag.bsa",
    "DLCOrrery.bsa",
    "DLCShiveringIsles - Meshes.bsa",
    "DLCThievesDen.bsa",
    "Knights.bsa",
    "Oblivion - Meshes.bsa",
];

// Written with `/` and converted to the host separator by `host_paths`;
// scope matching is a substring test on the native path string. Entries
// from YAML or the CLI are used exactly as given.
pub const DEFAULT_ACCEPT_DIRS: &[&str] = &[
    "meshes/architecture",
    "meshes/battlehorncastle",
    "meshes/clutter",
    "meshes/dungeons",
    "meshes/furniture",
    "meshes/landscape",
    "meshes/oblivion/architecture",
    "meshes/oblivion/caves",
    "meshes/oblivion/plants",
    "meshes/orrery",
    "meshes/plants",
    "meshes/rocks",
    "meshes/trees",
];

pub const DEFAULT_IGNORE_DIRS: &[&str] = &["clutter/magesguild"];

// Optimized distant-LOD meshes crash the game.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[r"_far\.nif"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ComposeConfig {
    /// Unoptimized tree, cloned wholesale into the target.
    pub base_dir: PathBuf,
    /// Holds one optimized subtree per archive.
    pub overlay_dir: PathBuf,
    pub target_dir: PathBuf,
    pub archives: Vec<String>,
    pub overlay: OverlayConfig,
    /// Glob of entry names left out of the clean clone.
    pub clone_ignore: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct OverlayConfig {
    pub accept_dirs: Vec<String>,
    pub ignore_dirs: Vec<String>,
    /// Regular expressions searched for in file names.
    pub ignore_files: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn host_paths(items: &[&str]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.replace('/', std::path::MAIN_SEPARATOR_STR))
        .collect()
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("extracted"),
            overlay_dir: PathBuf::from("optimized"),
            target_dir: PathBuf::from("composed"),
            archives: owned(DEFAULT_ARCHIVES),
            overlay: OverlayConfig::default(),
            clone_ignore: None,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            accept_dirs: host_paths(DEFAULT_ACCEPT_DIRS),
            ignore_dirs: host_paths(DEFAULT_IGNORE_DIRS),
            ignore_files: owned(DEFAULT_IGNORE_FILES),
        }
    }
}

impl ComposeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::not_found(path));
        }
        let text = fs::read_to_string(path).at(path)?;
        Self::parse(&text).map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Parses YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Self::parse(text).map_err(|e| Error::config(e.to_string()))
    }

    fn parse(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn overlay_options(&self) -> Result<OverlayOptions> {
        self.overlay.to_options()
    }

    pub fn clone_options(&self) -> Result<CloneOptions> {
        let ignore = self
            .clone_ignore
            .as_deref()
            .map(|glob| {
                Pattern::new(glob)
                    .map_err(|e| Error::config(format!("invalid clone-ignore glob '{glob}': {e}")))
            })
            .transpose()?;
        Ok(CloneOptions { ignore })
    }
}

impl OverlayConfig {
    pub fn to_options(&self) -> Result<OverlayOptions> {
        Ok(OverlayOptions {
            accept_dirs: self.accept_dirs.clone(),
            ignore_dirs: self.ignore_dirs.clone(),
            ignore_files: compile_patterns(&self.ignore_files)?,
        })
    }
}

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| Error::config(format!("invalid ignore-files pattern '{p}': {e}")))
        })
        .collect()
}
