use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::domain::ReplicateOptions;
use crate::error::{Error, IoContext, Result};

/// Writes `options.count` byte-identical copies of `template` into
/// `options.output_dir`, named `{prefix}001{suffix}` onwards.
///
/// The template is read once up front, so it may safely share a name with
/// one of the outputs.
pub fn replicate(template: &Path, options: &ReplicateOptions) -> Result<Vec<PathBuf>> {
    if options.count == 0 {
        return Err(Error::config("replicate count must be at least 1"));
    }
    if !template.is_file() {
        return Err(Error::not_found(template));
    }
    let content = fs::read(template).at(template)?;

    let mut written = Vec::with_capacity(options.count as usize);
    for index in 1..=options.count {
        let path = options.output_dir.join(options.file_name(index));
        debug!("Writing {}", path.display());
        fs::write(&path, &content).at(&path)?;
        written.push(path);
    }

    info!(
        "Replicated {} into {} copies in {}",
        template.display(),
        written.len(),
        options.output_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &Path, count: u32) -> ReplicateOptions {
        ReplicateOptions {
            count,
            prefix: "shaderpackage".into(),
            suffix: ".sdp".into(),
            output_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_replicate_nineteen_copies() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("template.sdp");
        fs::write(&template, b"\x00shader\xff").unwrap();

        let written = replicate(&template, &options(temp.path(), 19)).unwrap();

        assert_eq!(written.len(), 19);
        assert_eq!(written[0], temp.path().join("shaderpackage001.sdp"));
        assert_eq!(written[18], temp.path().join("shaderpackage019.sdp"));
        for path in &written {
            assert_eq!(fs::read(path).unwrap(), b"\x00shader\xff");
        }
    }

    #[test]
    fn test_template_may_be_one_of_the_outputs() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("shaderpackage019.sdp");
        fs::write(&template, "original").unwrap();

        replicate(&template, &options(temp.path(), 19)).unwrap();

        assert_eq!(fs::read_to_string(&template).unwrap(), "original");
        assert_eq!(
            fs::read_to_string(temp.path().join("shaderpackage007.sdp")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_overwrites_existing_outputs() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("t");
        fs::write(&template, "fresh").unwrap();
        fs::write(temp.path().join("shaderpackage001.sdp"), "stale").unwrap();

        replicate(&template, &options(temp.path(), 1)).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("shaderpackage001.sdp")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let err = replicate(&temp.path().join("absent.sdp"), &options(temp.path(), 3)).unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("t");
        fs::write(&template, "x").unwrap();

        let err = replicate(&template, &options(temp.path(), 0)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_file_name_padding() {
        let opts = options(Path::new("."), 1);
        assert_eq!(opts.file_name(1), "shaderpackage001.sdp");
        assert_eq!(opts.file_name(42), "shaderpackage042.sdp");
        assert_eq!(opts.file_name(1000), "shaderpackage1000.sdp");
    }
}
