//! Resource addresses
//!
//! A [`ResourceAddress`] is an ordered list of `key=value` segments from the
//! root of the resource tree. The root is the empty address. A segment value
//! of `*` is a wildcard: it names the resource type without naming an
//! instance.
//!
//! Addresses render in CLI style, `/subsystem=logging/console-handler=CONSOLE`,
//! and parse back from that form. `/`, `=` and `\` inside a key or value are
//! escaped with a backslash, so `/path=\/` names the instance `/`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::Error;

/// Segment value matching any instance of a resource type
pub const WILDCARD: &str = "*";

/// One `key=value` segment of an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathElement {
    pub key: String,
    pub value: String,
}

impl PathElement {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A segment naming a resource type but no instance
    pub fn wildcard(key: impl Into<String>) -> Self {
        Self::new(key, WILDCARD)
    }

    pub fn is_wildcard(&self) -> bool {
        self.value == WILDCARD
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.key)?;
        f.write_char('=')?;
        write_escaped(f, &self.value)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for ch in text.chars() {
        if matches!(ch, '/' | '=' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    Ok(())
}

/// Address of a resource in the management tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceAddress {
    elements: Vec<PathElement>,
}

impl ResourceAddress {
    /// The root address
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// Build an address from `(key, value)` pairs.
    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            elements: pairs
                .into_iter()
                .map(|(k, v)| PathElement::new(k, v))
                .collect(),
        }
    }

    /// A new address with `key=value` appended.
    pub fn append(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut elements = self.elements.clone();
        elements.push(PathElement::new(key, value));
        Self { elements }
    }

    /// A new address with `key=*` appended.
    pub fn append_wildcard(&self, key: impl Into<String>) -> Self {
        self.append(key, WILDCARD)
    }

    /// The address with the last segment dropped, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.elements.split_last()?;
        Some(Self {
            elements: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// The address of the instance `name` of this address's resource type.
    ///
    /// `/subsystem=*` with `logging` gives `/subsystem=logging`. The root has
    /// no resource type and so no siblings.
    pub fn sibling(&self, name: impl Into<String>) -> Option<Self> {
        let last = self.last()?;
        let parent = self.parent()?;
        Some(parent.append(last.key.clone(), name))
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// True when `self` is `prefix` or lies below it.
    pub fn starts_with(&self, prefix: &ResourceAddress) -> bool {
        self.elements.starts_with(&prefix.elements)
    }

    /// True when any segment is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.elements.iter().any(PathElement::is_wildcard)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("/");
        }
        for element in &self.elements {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidAddress {
            address: s.to_string(),
            reason,
        };

        let mut segments: Vec<(String, Option<String>)> = Vec::new();
        let mut key = String::new();
        let mut value: Option<String> = None;
        let mut chars = s.trim().chars();
        while let Some(ch) = chars.next() {
            let literal = match ch {
                '\\' => chars
                    .next()
                    .ok_or_else(|| invalid("address ends with an escape".to_string()))?,
                '/' => {
                    if !key.is_empty() || value.is_some() {
                        segments.push((std::mem::take(&mut key), value.take()));
                    }
                    continue;
                }
                '=' if value.is_none() => {
                    value = Some(String::new());
                    continue;
                }
                other => other,
            };
            match value.as_mut() {
                Some(value) => value.push(literal),
                None => key.push(literal),
            }
        }
        if !key.is_empty() || value.is_some() {
            segments.push((key, value));
        }

        let mut elements = Vec::with_capacity(segments.len());
        for (key, value) in segments {
            let Some(value) = value else {
                return Err(invalid(format!("segment '{key}' is not key=value")));
            };
            if key.is_empty() || value.is_empty() {
                return Err(invalid(format!("segment '{key}={value}' has an empty key or value")));
            }
            elements.push(PathElement::new(key, value));
        }
        Ok(Self { elements })
    }
}

impl TryFrom<String> for ResourceAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceAddress> for String {
    fn from(value: ResourceAddress) -> Self {
        value.to_string()
    }
}
