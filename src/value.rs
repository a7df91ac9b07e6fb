// Value model for variable bindings
//
// RFC 6570 values come in three shapes: strings, lists of strings and
// associative arrays. Loading from JSON/YAML collapses numbers and booleans
// into strings and drops nulls, which the RFC treats as undefined.

use serde::{de, Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A bound variable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    /// Associative array; pairs are rendered in the order given here
    Map(Vec<(String, MapValue)>),
}

/// Member of an associative array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapValue {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    pub fn scalar(value: impl Into<String>) -> Self {
        Value::Scalar(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MapValue>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Empty lists and maps count as undefined; an empty string does not.
    pub fn is_undefined(&self) -> bool {
        match self {
            Value::Scalar(_) => false,
            Value::List(items) => items.is_empty(),
            Value::Map(pairs) => pairs.is_empty(),
        }
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self, Value::Scalar(_))
    }

    /// Convert a JSON value. Returns `Ok(None)` for `null`.
    pub fn from_json(value: serde_json::Value) -> Result<Option<Value>> {
        use serde_json::Value as Json;

        match value {
            Json::Null => Ok(None),
            Json::Array(items) => Ok(Some(Value::List(json_list(items)?))),
            Json::Object(object) => {
                let mut pairs = Vec::with_capacity(object.len());
                for (key, member) in object {
                    let member = match member {
                        Json::Null => continue,
                        Json::Array(items) => MapValue::List(json_list(items)?),
                        Json::Object(_) => {
                            return Err(Error::InvalidValues(format!(
                                "Associative array member '{}' cannot be an object",
                                key
                            )))
                        }
                        other => MapValue::Scalar(json_scalar(&other).unwrap_or_default()),
                    };
                    pairs.push((key, member));
                }
                Ok(Some(Value::Map(pairs)))
            }
            other => Ok(json_scalar(&other).map(Value::Scalar)),
        }
    }
}

fn json_scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_list(items: Vec<serde_json::Value>) -> Result<Vec<String>> {
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        if item.is_null() {
            continue;
        }
        let scalar = json_scalar(&item).ok_or_else(|| {
            Error::InvalidValues(format!("List members must be scalar values, got {}", item))
        })?;
        list.push(scalar);
    }
    Ok(list)
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl<S: Into<String>> From<Vec<S>> for Value {
    fn from(items: Vec<S>) -> Self {
        Value::list(items)
    }
}

impl From<&str> for MapValue {
    fn from(value: &str) -> Self {
        MapValue::Scalar(value.to_string())
    }
}

impl From<String> for MapValue {
    fn from(value: String) -> Self {
        MapValue::Scalar(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for MapValue {
    fn from(items: Vec<S>) -> Self {
        MapValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Variable bindings looked up by name during expansion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load bindings from a JSON object. Null members are skipped.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(Error::InvalidValues(format!(
                    "Variables must be an object, got {}",
                    other
                )))
            }
        };

        let mut variables = Self::new();
        for (name, raw) in object {
            if let Some(value) = Value::from_json(raw)? {
                variables.values.insert(name, value);
            }
        }
        Ok(variables)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| Error::InvalidValues(format!("JSON error: {}", e)))?;
        Self::from_json(raw)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(input)
            .map_err(|e| Error::InvalidValues(format!("YAML error: {}", e)))?;
        Self::from_json(raw)
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

impl<'de> Deserialize<'de> for Variables {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Variables::from_json(raw).map_err(de::Error::custom)
    }
}
