//! Parsed overlay values
//!
//! A [`DocumentValue`] is produced once by the parser and never mutated
//! afterwards. Mappings keep the author's key order so that operations are
//! emitted in the order their keys are visited.

use indexmap::IndexMap;
use std::fmt;

/// A sentinel standing in place of an ordinary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Remove the resource named by the key (`!remove`)
    Remove,
    /// Undefine the attribute named by the key (`!undefine`)
    Undefine,
}

impl Directive {
    /// Tag name this directive is written with, without the leading `!`
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Undefine => "undefine",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.tag())
    }
}

/// A scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    /// A number kept in its canonical textual form
    Number(String),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(n),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// An insertion-ordered string-keyed mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<String, DocumentValue>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing entry in place.
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: DocumentValue) -> Option<DocumentValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<DocumentValue> {
        self.entries.shift_remove(key)
    }

    /// A copy of this mapping without the given keys, order preserved.
    pub fn without<S: AsRef<str>>(&self, keys: &[S]) -> Mapping {
        self.iter()
            .filter(|(k, _)| !keys.iter().any(|skip| skip.as_ref() == *k))
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, DocumentValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, DocumentValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, DocumentValue);
    type IntoIter = indexmap::map::IntoIter<String, DocumentValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A parsed overlay value
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// An explicit empty value (`~`, `null` or a key with no body)
    Null,
    Scalar(Scalar),
    Sequence(Vec<DocumentValue>),
    Mapping(Mapping),
    Directive(Directive),
}

impl DocumentValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DocumentValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<Directive> {
        match self {
            Self::Directive(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value shape, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Directive(_) => "directive",
        }
    }
}

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for DocumentValue {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<bool> for DocumentValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for DocumentValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Number(value.to_string()))
    }
}

impl From<Mapping> for DocumentValue {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(value: Vec<DocumentValue>) -> Self {
        Self::Sequence(value)
    }
}

impl fmt::Display for DocumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(s) => s.fmt(f),
            Self::Directive(d) => d.fmt(f),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
