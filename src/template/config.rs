// Per-operator expansion parameters

use super::ast::Operator;
use super::encoding::Encoding;
use crate::error::Result;

/// Fixed parameters an operator applies to every variable it expands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionConfig {
    pub add_prefix: bool,
    pub separator: &'static str,
    /// Emitted for a named empty value, or for an expression that joined to nothing
    pub empty_value: &'static str,
    pub add_name: bool,
    pub encoding: Encoding,
}

impl ExpansionConfig {
    pub fn for_operator(op: Operator) -> Self {
        let (add_prefix, separator, empty_value, add_name, encoding) = match op {
            Operator::Simple => (true, ",", "", false, Encoding::Unreserved),
            Operator::Reserved => (false, ",", "", false, Encoding::ReservedPreserving),
            Operator::Fragment => (true, ",", "#", false, Encoding::ReservedPreserving),
            Operator::Label => (true, ".", ".", false, Encoding::Unreserved),
            Operator::PathSegment => (true, "/", "", false, Encoding::Unreserved),
            Operator::PathParameter => (true, ";", "", true, Encoding::Unreserved),
            Operator::Query | Operator::QueryContinuation => {
                (true, "&", "=", true, Encoding::Unreserved)
            }
        };

        Self {
            add_prefix,
            separator,
            empty_value,
            add_name,
            encoding,
        }
    }

    /// Derive the config from a raw operator symbol; `None` is the simple operator.
    pub fn from_symbol(symbol: Option<char>) -> Result<Self> {
        Operator::from_symbol(symbol).map(Self::for_operator)
    }

    pub fn encode(&self, value: &str) -> String {
        self.encoding.encode(value)
    }
}
