// Expression-level combination of rendered variables

use super::ast::{Operator, VariableSpec};
use super::config::ExpansionConfig;
use super::variable::Variable;
use crate::error::Result;
use crate::value::Variables;

/// Applies an operator's prefix and separator to its variables
pub(crate) struct OperatorExpansion {
    prefix: Option<char>,
    config: ExpansionConfig,
}

impl OperatorExpansion {
    pub fn new(op: Operator) -> Self {
        let config = ExpansionConfig::for_operator(op);
        let prefix = if config.add_prefix { op.symbol() } else { None };
        Self { prefix, config }
    }

    pub fn expand(&self, variables: &[VariableSpec], values: &Variables) -> Result<String> {
        let mut rendered = Vec::with_capacity(variables.len());
        for spec in variables {
            let variable = Variable::new(spec, &self.config);
            if let Some(s) = variable.expand(values.get(&spec.name))? {
                rendered.push(s);
            }
        }

        // Nothing defined: no prefix, no separator, nothing at all
        if rendered.is_empty() {
            return Ok(String::new());
        }

        let joined = rendered.join(self.config.separator);
        if joined.is_empty() {
            return Ok(self.config.empty_value.to_string());
        }

        let mut result = String::with_capacity(joined.len() + 1);
        if let Some(prefix) = self.prefix {
            result.push(prefix);
        }
        result.push_str(&joined);
        Ok(result)
    }
}
