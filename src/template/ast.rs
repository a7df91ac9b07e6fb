// Abstract Syntax Tree types for URI templates

use std::str::FromStr;

use super::operator::OperatorExpansion;
use super::parser::TemplateParser;
use super::resolver::TemplateResolver;
use crate::error::{Error, Result, SyntaxError};
use crate::value::Variables;

/// A parsed template: literal text interleaved with expressions.
///
/// Immutable once built, so a single instance can be shared across threads
/// and expanded concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Build a template from already-tokenized parts, bypassing the grammar.
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    pub fn parse(input: &str) -> Result<Self> {
        TemplateParser::parse(input)
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// All expressions in source order
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Expression(expr) => Some(expr),
            _ => None,
        })
    }

    /// Get all variables in this template
    pub fn variables(&self) -> Vec<&VariableSpec> {
        self.expressions()
            .flat_map(|expr| expr.variables.iter())
            .collect()
    }

    pub fn expand(&self, values: &Variables) -> Result<String> {
        TemplateResolver::new().resolve(self, values)
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Template::parse(s)
    }
}

/// A template consists of literal strings and expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Expression(Expression),
}

/// One `{...}` unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub operator: Operator,
    pub variables: Vec<VariableSpec>,
}

impl Expression {
    pub fn new(operator: Operator, variables: Vec<VariableSpec>) -> Self {
        Self {
            operator,
            variables,
        }
    }

    pub fn expand(&self, values: &Variables) -> Result<String> {
        OperatorExpansion::new(self.operator).expand(&self.variables, values)
    }
}

/// A variable reference with its modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: String,
    /// Prefix modifier (`:N`), counted in characters
    pub max_length: Option<usize>,
    /// Explode modifier (`*`)
    pub explode: bool,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_length: None,
            explode: false,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }
}

/// Expression operators; `Simple` is the absence of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    pub fn from_symbol(symbol: Option<char>) -> Result<Self> {
        let op = match symbol {
            None => Operator::Simple,
            Some('+') => Operator::Reserved,
            Some('#') => Operator::Fragment,
            Some('.') => Operator::Label,
            Some('/') => Operator::PathSegment,
            Some(';') => Operator::PathParameter,
            Some('?') => Operator::Query,
            Some('&') => Operator::QueryContinuation,
            Some(other) => {
                return Err(SyntaxError::new("Invalid expression operator")
                    .expected("one of + # . / ; ? &")
                    .found(Some(other))
                    .into())
            }
        };
        Ok(op)
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            Operator::Simple => None,
            Operator::Reserved => Some('+'),
            Operator::Fragment => Some('#'),
            Operator::Label => Some('.'),
            Operator::PathSegment => Some('/'),
            Operator::PathParameter => Some(';'),
            Operator::Query => Some('?'),
            Operator::QueryContinuation => Some('&'),
        }
    }
}
