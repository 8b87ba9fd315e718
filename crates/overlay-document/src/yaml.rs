//! YAML parsing into the overlay document model using serde_yaml

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::tags::TagRegistry;
use crate::value::{DocumentValue, Mapping, Scalar};

/// Parser for YAML overlay documents
#[derive(Debug, Clone, Default)]
pub struct YamlParser {
    tags: TagRegistry,
}

impl YamlParser {
    /// Create a parser that understands the directive tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser using a custom tag registry.
    pub fn with_tags(tags: TagRegistry) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Parse YAML source into a document value.
    ///
    /// An empty source yields [`DocumentValue::Null`].
    pub fn parse(&self, source: &str) -> Result<DocumentValue> {
        let value: YamlValue =
            serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))?;
        self.convert(&value)
    }

    /// Convert an already parsed serde_yaml value.
    pub fn convert(&self, value: &YamlValue) -> Result<DocumentValue> {
        Ok(match value {
            YamlValue::Null => DocumentValue::Null,
            YamlValue::Bool(b) => DocumentValue::Scalar(Scalar::Bool(*b)),
            YamlValue::Number(n) => DocumentValue::Scalar(Scalar::Number(n.to_string())),
            YamlValue::String(s) => DocumentValue::Scalar(Scalar::String(s.clone())),
            YamlValue::Sequence(items) => DocumentValue::Sequence(
                items
                    .iter()
                    .map(|item| self.convert(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (key, value) in map {
                    mapping.insert(mapping_key(key)?, self.convert(value)?);
                }
                DocumentValue::Mapping(mapping)
            }
            YamlValue::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                let build = self.tags.get(&tag).ok_or_else(|| Error::UnknownTag {
                    tag: tag.trim_start_matches('!').to_string(),
                })?;
                build(&tagged.value)?
            }
        })
    }
}

fn mapping_key(key: &YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        other => Err(Error::parse(
            "YAML",
            format!("unsupported mapping key: {other:?}"),
        )),
    }
}
