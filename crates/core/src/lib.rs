//! XML-to-JSON Tree Conversion Core Library
//!
//! This library walks a directory tree, parses every `.xml` file it finds,
//! and writes the equivalent JSON structure to a sibling file with the
//! extension swapped.
//!
//! # Features
//!
//! - Recursive directory traversal with optional symlink following
//! - xmltodict-style mapping: element tags become keys, attributes become
//!   `@`-prefixed keys, text content becomes values or `#text` entries,
//!   repeated sibling elements become arrays
//! - Deterministic output, so reruns over an unchanged tree are byte-identical
//! - Section index generation for legal-code trees (`section_index.json`)
//!
//! # Example
//!
//! ```no_run
//! use xml2json_core::{ConvertConfig, TreeConverter};
//! use std::path::PathBuf;
//!
//! let config = ConvertConfig::new(PathBuf::from("dc-code-prototype"));
//! let report = TreeConverter::new(config).run().unwrap();
//! println!("{} files converted", report.stats.converted);
//! ```

pub mod config;
pub mod converter;
pub mod index;
pub mod models;
pub mod output;
pub mod xml;

// Re-exports for convenience
pub use config::{ConvertConfig, DEFAULT_ROOT};
pub use converter::{ConvertError, TreeConverter};
pub use index::{SectionIndexer, SECTION_INDEX_FILE};
pub use models::*;
pub use output::{from_json, to_json, FormatError};
pub use xml::{parse_document, XmlError};
