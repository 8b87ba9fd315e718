//! Pluggable YAML tag constructors
//!
//! When the parser meets a tagged node (`!name value`) it looks the tag up
//! here and lets the registered constructor build the document value.
//! Unregistered tags are rejected.

use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

use crate::error::Result;
use crate::value::{Directive, DocumentValue};

/// Builds a document value from the node a tag was attached to
pub type TagConstructor = fn(&YamlValue) -> Result<DocumentValue>;

/// Registry of tag name to constructor
#[derive(Clone)]
pub struct TagRegistry {
    constructors: HashMap<String, TagConstructor>,
}

impl TagRegistry {
    /// Create a registry with no tags registered.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the `!remove` and `!undefine` directives.
    pub fn with_directives() -> Self {
        let mut registry = Self::empty();
        registry.register(Directive::Remove.tag(), |_| {
            Ok(DocumentValue::Directive(Directive::Remove))
        });
        registry.register(Directive::Undefine.tag(), |_| {
            Ok(DocumentValue::Directive(Directive::Undefine))
        });
        registry
    }

    /// Register a constructor. A leading `!` on the name is ignored.
    pub fn register(&mut self, tag: &str, constructor: TagConstructor) {
        self.constructors
            .insert(normalize(tag).to_string(), constructor);
    }

    pub fn get(&self, tag: &str) -> Option<TagConstructor> {
        self.constructors.get(normalize(tag)).copied()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(normalize(tag))
    }

    /// Registered tag names (sorted).
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.constructors.keys().map(|s| s.as_str()).collect();
        tags.sort();
        tags
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_directives()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

fn normalize(tag: &str) -> &str {
    tag.trim_start_matches('!')
}
