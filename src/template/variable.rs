// Rendering of a single variable reference

use super::ast::VariableSpec;
use super::config::ExpansionConfig;
use crate::error::{Error, Result};
use crate::value::{MapValue, Value};

/// One variable of an expression, bound to its operator's config
pub(crate) struct Variable<'a> {
    spec: &'a VariableSpec,
    config: &'a ExpansionConfig,
}

impl<'a> Variable<'a> {
    pub fn new(spec: &'a VariableSpec, config: &'a ExpansionConfig) -> Self {
        Self { spec, config }
    }

    /// Render the bound value. `Ok(None)` means the variable is undefined
    /// and must be left out of the expression entirely.
    pub fn expand(&self, value: Option<&Value>) -> Result<Option<String>> {
        let value = match value {
            Some(value) if !value.is_undefined() => value,
            _ => return Ok(None),
        };

        if self.spec.max_length.is_some() && value.is_composite() {
            return Err(Error::expanding(format!(
                "Prefix modifier is incompatible with composite values (variable '{}')",
                self.spec.name
            )));
        }

        let rendered = if self.spec.explode {
            self.expand_explode(value)
        } else {
            self.expand_single(value)
        };
        Ok(Some(rendered))
    }

    fn expand_single(&self, value: &Value) -> String {
        let encoded = match value {
            Value::Scalar(s) => self.encode(self.truncate(s)),
            Value::List(items) => self.encode_joined(items),
            Value::Map(pairs) => pairs
                .iter()
                .map(|(key, member)| format!("{},{}", self.encode(key), self.encode_member(member)))
                .collect::<Vec<_>>()
                .join(","),
        };

        self.with_name(encoded)
    }

    fn expand_explode(&self, value: &Value) -> String {
        let separator = self.config.separator;

        match value {
            Value::Scalar(s) => self.encode(self.truncate(s)),
            Value::List(items) => items
                .iter()
                .map(|item| {
                    let encoded = self.encode(item);
                    if self.config.add_name {
                        format!("{}={}", self.spec.name, encoded)
                    } else {
                        encoded
                    }
                })
                .collect::<Vec<_>>()
                .join(separator),
            Value::Map(pairs) => {
                let mut rendered = Vec::with_capacity(pairs.len());
                for (key, member) in pairs {
                    let key = self.encode(key);
                    match member {
                        MapValue::Scalar(s) => rendered.push(format!("{}={}", key, self.encode(s))),
                        MapValue::List(items) => {
                            for item in items {
                                rendered.push(format!("{}={}", key, self.encode(item)));
                            }
                        }
                    }
                }
                rendered.join(separator)
            }
        }
    }

    fn with_name(&self, encoded: String) -> String {
        if !self.config.add_name {
            return encoded;
        }

        if encoded.is_empty() {
            format!("{}{}", self.spec.name, self.config.empty_value)
        } else {
            format!("{}={}", self.spec.name, encoded)
        }
    }

    fn encode_member(&self, member: &MapValue) -> String {
        match member {
            MapValue::Scalar(s) => self.encode(s),
            MapValue::List(items) => self.encode_joined(items),
        }
    }

    fn encode_joined(&self, items: &[String]) -> String {
        items
            .iter()
            .map(|item| self.encode(item))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn encode(&self, value: &str) -> String {
        self.config.encode(value)
    }

    // Truncation counts characters, not bytes, and happens before encoding.
    fn truncate<'v>(&self, value: &'v str) -> &'v str {
        match self
            .spec
            .max_length
            .and_then(|max| value.char_indices().nth(max))
        {
            Some((end, _)) => &value[..end],
            None => value,
        }
    }
}
