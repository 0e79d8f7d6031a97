use std::path::PathBuf;
use clap::{Parser, Subcommand};
use crate::config::{compile_patterns, ComposeConfig};
use crate::domain::{CloneOptions, OverlayOptions, ReplicateOptions};
use crate::error::{Error, Result};

pub mod compose;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod overlay;
pub mod replicate;

pub use crate::compose::compose;
pub use crate::fs::copy_clean_tree;
pub use crate::overlay::copy_over_tree;
pub use crate::replicate::replicate;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write numbered copies of a template file
    Replicate {
        /// File to copy
        template: PathBuf,

        /// Number of copies, indexed from 001
        #[arg(short = 'n', long, default_value_t = 19, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        #[arg(long, default_value = "shaderpackage")]
        prefix: String,

        #[arg(long, default_value = ".sdp")]
        suffix: String,

        /// Directory the copies are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Replace a directory with a fresh copy of another
    Clone {
        src: PathBuf,
        dst: PathBuf,

        /// Glob of entry names to leave out
        #[arg(long, value_name = "GLOB")]
        ignore: Option<String>,
    },

    /// Copy selected files from one tree over another
    Overlay {
        src: PathBuf,
        dst: PathBuf,

        /// Path substring that puts a directory's files in scope (repeatable)
        #[arg(long = "accept-dir", value_name = "SUBSTRING")]
        accept_dirs: Vec<String>,

        /// Directory name pruned from traversal (repeatable)
        #[arg(long = "ignore-dir", value_name = "NAME")]
        ignore_dirs: Vec<String>,

        /// Regex of file names never copied (repeatable)
        #[arg(long = "ignore-file", value_name = "REGEX")]
        ignore_files: Vec<String>,
    },

    /// Clone the base tree, then overlay every optimized archive onto it
    Compose {
        /// YAML configuration; built-in defaults are used when omitted
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        overlay_dir: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        target_dir: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Replicate {
            template,
            count,
            prefix,
            suffix,
            output_dir,
        } => {
            let options = ReplicateOptions {
                count,
                prefix,
                suffix,
                output_dir,
            };
            let written = replicate(&template, &options)?;
            println!("Wrote {} copies of {}", written.len(), template.display());
        }
        Command::Clone { src, dst, ignore } => {
            let ignore = ignore
                .map(|glob| {
                    glob::Pattern::new(&glob)
                        .map_err(|e| Error::config(format!("invalid ignore glob '{glob}': {e}")))
                })
                .transpose()?;
            let stats = copy_clean_tree(&src, &dst, &CloneOptions { ignore })?;
            println!("Cloned {} files into {}", stats.files, dst.display());
        }
        Command::Overlay {
            src,
            dst,
            accept_dirs,
            ignore_dirs,
            ignore_files,
        } => {
            let options = OverlayOptions {
                accept_dirs,
                ignore_dirs,
                ignore_files: compile_patterns(&ignore_files)?,
            };
            let stats = copy_over_tree(&src, &dst, &options)?;
            println!(
                "Copied {} files ({} replaced, {} ignored)",
                stats.copied, stats.replaced, stats.ignored_files
            );
        }
        Command::Compose {
            config,
            base_dir,
            overlay_dir,
            target_dir,
        } => {
            let mut config = match config {
                Some(path) => ComposeConfig::load(&path)?,
                None => ComposeConfig::default(),
            };
            if let Some(dir) = base_dir {
                config.base_dir = dir;
            }
            if let Some(dir) = overlay_dir {
                config.overlay_dir = dir;
            }
            if let Some(dir) = target_dir {
                config.target_dir = dir;
            }
            let report = compose(&config)?;
            for archive in &report.archives {
                println!("{}: {} optimized files applied", archive.archive, archive.stats.copied);
            }
            println!("Composed into {}", config.target_dir.display());
        }
    }
    Ok(())
}
