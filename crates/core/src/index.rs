use crate::config::ConvertConfig;
use crate::converter::ConvertError;
use crate::models::Node;
use crate::output::FormatError;
use crate::xml;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// File name of the persisted section index
pub const SECTION_INDEX_FILE: &str = "section_index.json";

/// Builds the section-number-to-file index for a code tree.
///
/// Only documents whose root element is `<level>` with a `<type>` child of
/// `Section` are indexed; everything else is skipped silently. `.git` and
/// `node_modules` directories are pruned from the walk.
pub struct SectionIndexer {
    config: ConvertConfig,
}

impl SectionIndexer {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Map section numbers to root-relative paths with the extension stripped.
    pub fn build(&self) -> Result<BTreeMap<String, String>, ConvertError> {
        let mut index = BTreeMap::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && matches!(entry.file_name().to_str(), Some(".git") | Some("node_modules")))
            });

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension() != Some(OsStr::new("xml")) {
                continue;
            }

            let xml_src = fs::read_to_string(path).map_err(|source| ConvertError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let document = xml::parse_document(&xml_src).map_err(|source| ConvertError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

            let level = match document.get("level") {
                Some(node) => node,
                None => continue,
            };
            if level.get("type").and_then(Node::as_text) != Some("Section") {
                continue;
            }
            let num = match level.get("num").and_then(Node::as_text) {
                Some(num) => num,
                None => continue,
            };

            let file = path
                .strip_prefix(&self.config.root)
                .unwrap_or(path)
                .with_extension("");
            index.insert(num.to_string(), file.to_string_lossy().into_owned());
        }

        Ok(index)
    }

    /// Build the index and write it as JSON at the root.
    pub fn write(&self) -> Result<PathBuf, ConvertError> {
        let index = self.build()?;
        let json = serde_json::to_string(&index).map_err(FormatError::Json)?;

        let path = self.config.root.join(SECTION_INDEX_FILE);
        fs::write(&path, json).map_err(|source| ConvertError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
