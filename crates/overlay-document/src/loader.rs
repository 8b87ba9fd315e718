//! Overlay file loading
//!
//! An overlay file may carry unrelated content; only the subtree under the
//! configured root key is the overlay. Loaded documents are collected into an
//! [`OverlaySet`] owned by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::value::{DocumentValue, Mapping};
use crate::yaml::YamlParser;

/// A single overlay document, reduced to its root subtree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayDocument {
    source: Option<PathBuf>,
    root: Mapping,
}

impl OverlayDocument {
    /// Wrap an already parsed root mapping.
    pub fn new(root: Mapping) -> Self {
        Self { source: None, root }
    }

    /// Parse YAML source and select the `root_key` subtree.
    ///
    /// A document without the root key, or whose root key is not a mapping,
    /// produces an empty overlay.
    pub fn parse(source: &str, root_key: &str, parser: &YamlParser) -> Result<Self> {
        let root = match parser.parse(source)? {
            DocumentValue::Null => {
                tracing::debug!("Overlay document is empty");
                Mapping::new()
            }
            DocumentValue::Mapping(mut top) => match top.remove(root_key) {
                Some(DocumentValue::Mapping(root)) => root,
                Some(other) => {
                    tracing::warn!(
                        root_key,
                        found = other.kind_name(),
                        "Overlay root is not a mapping, ignoring document"
                    );
                    Mapping::new()
                }
                None => {
                    tracing::warn!(root_key, "Overlay document has no root key, ignoring");
                    Mapping::new()
                }
            },
            other => {
                return Err(Error::parse(
                    "YAML",
                    format!("overlay document must be a mapping, found {}", other.kind_name()),
                ));
            }
        };
        Ok(Self { source: None, root })
    }

    /// Read and parse an overlay file.
    pub fn load(path: &Path, root_key: &str, parser: &YamlParser) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::OverlayNotFound {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(?path, "Loading overlay document");
        let content = fs::read_to_string(path)?;
        let mut document = Self::parse(&content, root_key, parser)?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    /// The file this document was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// An ordered collection of overlay documents
#[derive(Debug, Clone, Default)]
pub struct OverlaySet {
    documents: Vec<OverlayDocument>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every path in order. The first failure aborts loading.
    pub fn load_all<P: AsRef<Path>>(
        paths: &[P],
        root_key: &str,
        parser: &YamlParser,
    ) -> Result<Self> {
        let mut set = Self::new();
        for path in paths {
            set.push(OverlayDocument::load(path.as_ref(), root_key, parser)?);
        }
        Ok(set)
    }

    pub fn push(&mut self, document: OverlayDocument) {
        self.documents.push(document);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayDocument> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<OverlayDocument> for OverlaySet {
    fn from_iter<I: IntoIterator<Item = OverlayDocument>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_selects_root_key() {
        let parser = YamlParser::new();
        let doc = OverlayDocument::parse(
            "other: 1\nconfiguration:\n  subsystem:\n    logging: {}\n",
            "configuration",
            &parser,
        )
        .unwrap();
        assert_eq!(doc.root().keys().collect::<Vec<_>>(), vec!["subsystem"]);
        assert!(doc.source().is_none());
    }

    #[test]
    fn parse_without_root_key_is_empty() {
        let parser = YamlParser::new();
        let doc = OverlayDocument::parse("something: else\n", "configuration", &parser).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn parse_rejects_scalar_document() {
        let parser = YamlParser::new();
        assert!(OverlayDocument::parse("just text", "configuration", &parser).is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let parser = YamlParser::new();
        let err = OverlayDocument::load(&temp.path().join("nope.yml"), "configuration", &parser)
            .unwrap_err();
        assert!(matches!(err, Error::OverlayNotFound { .. }));
    }

    #[test]
    fn load_all_keeps_order() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("a.yml");
        let second = temp.path().join("b.yml");
        fs::write(&first, "configuration:\n  one: {}\n").unwrap();
        fs::write(&second, "configuration:\n  two: {}\n").unwrap();

        let set = OverlaySet::load_all(&[&first, &second], "configuration", &YamlParser::new())
            .unwrap();
        let keys: Vec<_> = set
            .iter()
            .map(|d| d.root().keys().next().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["one", "two"]);
        assert_eq!(set.iter().next().unwrap().source(), Some(first.as_path()));
    }
}
