//! Operation parameter values
//!
//! Compiled parameters are strings, ordered objects, or lists of those.
//! Everything scalar is carried as text; typing is the runtime's concern.

use indexmap::IndexMap;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModelValue {
    /// No value. Serializes as `null`.
    Undefined,
    String(String),
    List(Vec<ModelValue>),
    Object(ModelObject),
}

impl ModelValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ModelValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ModelObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<&str> for ModelValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ModelValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ModelObject> for ModelValue {
    fn from(value: ModelObject) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<ModelValue>> for ModelValue {
    fn from(value: Vec<ModelValue>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for ModelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Object(obj) => write!(f, "{{{obj}}}"),
        }
    }
}

/// An ordered name to value map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelObject {
    entries: IndexMap<String, ModelValue>,
}

impl ModelObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing an existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ModelValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ModelValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ModelValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ModelObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

struct ModelValueVisitor;

impl<'de> Visitor<'de> for ModelValueVisitor {
    type Value = ModelValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, list or object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ModelValue, E> {
        Ok(ModelValue::String(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<ModelValue, E> {
        Ok(ModelValue::Undefined)
    }

    fn visit_unit<E: de::Error>(self) -> Result<ModelValue, E> {
        Ok(ModelValue::Undefined)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ModelValue, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ModelValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ModelValue, A::Error> {
        ModelObject::deserialize(MapAccessDeserializer::new(map)).map(ModelValue::Object)
    }
}

impl<'de> Deserialize<'de> for ModelValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ModelValueVisitor)
    }
}
