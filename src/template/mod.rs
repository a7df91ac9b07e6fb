// Template module for RFC 6570 URI templates
//
// This module provides parsing and expansion of URI templates: the parser
// produces literal and expression parts, and expansion renders each
// expression through its operator's config and encoding.

mod ast;
mod config;
pub mod encoding;
mod operator;
mod parser;
mod resolver;
mod variable;

pub use ast::{Expression, Operator, Template, TemplatePart, VariableSpec};
pub use config::ExpansionConfig;
pub use encoding::{reserved_encode, unreserved_encode, Encoding};
pub use parser::TemplateParser;
pub use resolver::TemplateResolver;
