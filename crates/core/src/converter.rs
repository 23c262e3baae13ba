use crate::config::ConvertConfig;
use crate::models::{ConvertMetadata, ConvertReport, ConvertStats, ConvertedFile};
use crate::output::{self, FormatError};
use crate::xml::{self, XmlError};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: XmlError },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// One-shot converter for a directory tree.
///
/// Walks the configured root, converts every `.xml` file to a `.json`
/// sibling, and stops at the first failure. Artifacts written before a
/// failure are left on disk.
pub struct TreeConverter {
    config: ConvertConfig,
}

impl TreeConverter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Run the conversion pass and return the report.
    pub fn run(&self) -> Result<ConvertReport, ConvertError> {
        let start = Instant::now();

        let mut files = Vec::new();
        let mut stats = ConvertStats::default();

        for entry in WalkDir::new(&self.config.root).follow_links(self.config.follow_links) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            stats.total_files += 1;

            let path = entry.path();
            // Extension match is exact and case-sensitive
            if path.extension() != Some(OsStr::new("xml")) {
                stats.skipped += 1;
                continue;
            }

            let artifact = self.convert_file(path)?;
            stats.converted += 1;
            files.push(ConvertedFile {
                source: self.relative(path),
                artifact: self.relative(&artifact),
            });
        }

        let duration = start.elapsed();
        let metadata = ConvertMetadata {
            duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                stats.converted as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(ConvertReport {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Convert a single candidate file, returning the artifact path.
    ///
    /// The artifact is written directly, overwriting any existing sibling.
    fn convert_file(&self, path: &Path) -> Result<PathBuf, ConvertError> {
        let xml_src = fs::read_to_string(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = xml::parse_document(&xml_src).map_err(|source| ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let json = output::to_json(&document)?;

        let artifact = path.with_extension("json");
        fs::write(&artifact, json).map_err(|source| ConvertError::Write {
            path: artifact.clone(),
            source,
        })?;

        Ok(artifact)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn convert(root: &Path) -> Result<ConvertReport, ConvertError> {
        TreeConverter::new(ConvertConfig::new(root.to_path_buf())).run()
    }

    #[test]
    fn test_converts_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/b.xml"), "<r><x>1</x></r>").unwrap();
        fs::write(dir.path().join("c.txt"), "not xml").unwrap();

        let report = convert(dir.path()).unwrap();

        let json = fs::read_to_string(dir.path().join("a/b.json")).unwrap();
        assert_eq!(json, r#"{"r":{"x":"1"}}"#);
        assert!(!dir.path().join("c.json").exists());
        assert_eq!(report.stats.converted, 1);
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.stats.total_files, 2);
        assert_eq!(report.files[0].source, PathBuf::from("a/b.xml"));
        assert_eq!(report.files[0].artifact, PathBuf::from("a/b.json"));
    }

    #[test]
    fn test_non_xml_tree_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("c.txt"), "plain").unwrap();

        let report = convert(dir.path()).unwrap();

        assert_eq!(report.stats.converted, 0);
        assert!(fs::read_dir(dir.path())
            .unwrap()
            .all(|e| e.unwrap().path().extension() != Some(OsStr::new("json"))));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.XML"), "<r/>").unwrap();

        let report = convert(dir.path()).unwrap();

        assert_eq!(report.stats.converted, 0);
        assert!(!dir.path().join("b.json").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b.xml"),
            r#"<level e="5" a="1"><num>1-101</num><text>a</text><text>b</text></level>"#,
        )
        .unwrap();

        convert(dir.path()).unwrap();
        let first = fs::read(dir.path().join("b.json")).unwrap();
        convert(dir.path()).unwrap();
        let second = fs::read(dir.path().join("b.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_artifact_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xml"), "<r/>").unwrap();
        fs::write(dir.path().join("b.json"), "stale garbage").unwrap();

        convert(dir.path()).unwrap();

        let json = fs::read_to_string(dir.path().join("b.json")).unwrap();
        assert_eq!(json, r#"{"r":null}"#);
    }

    #[test]
    fn test_missing_root_aborts_before_processing() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert(&dir.path().join("nope"));
        assert!(matches!(result, Err(ConvertError::Walk(_))));
    }

    #[test]
    fn test_malformed_file_aborts_and_keeps_earlier_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.xml"), "<r><x>1</x></r>").unwrap();
        convert(dir.path()).unwrap();

        fs::write(dir.path().join("bad.xml"), "<r><x>").unwrap();
        let result = convert(dir.path());

        match result {
            Err(ConvertError::Parse { path, .. }) => {
                assert_eq!(path, dir.path().join("bad.xml"));
            }
            other => panic!("expected parse error, got {:?}", other.map(|r| r.stats)),
        }
        // The artifact from the earlier pass is untouched
        let json = fs::read_to_string(dir.path().join("good.json")).unwrap();
        assert_eq!(json, r#"{"r":{"x":"1"}}"#);
    }
}
