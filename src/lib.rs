//! RFC 6570 URI Template expansion.
//!
//! ```
//! use uritemplate::{parse, Variables};
//!
//! let template = parse("https://api.example.com/repos{/owner,repo}/issues{?state,labels}")?;
//! let values = Variables::new()
//!     .with("owner", "rust-lang")
//!     .with("repo", "rust")
//!     .with("state", "open")
//!     .with("labels", vec!["bug", "help wanted"]);
//!
//! assert_eq!(
//!     template.expand(&values)?,
//!     "https://api.example.com/repos/rust-lang/rust/issues?state=open&labels=bug,help%20wanted"
//! );
//! # Ok::<(), uritemplate::Error>(())
//! ```

pub mod error;
pub mod template;
pub mod value;

pub use error::{Error, Result, SyntaxError};
pub use template::{
    Encoding, ExpansionConfig, Expression, Operator, Template, TemplatePart, TemplateParser,
    TemplateResolver, VariableSpec,
};
pub use value::{MapValue, Value, Variables};

/// Parse a template string.
pub fn parse(input: &str) -> Result<Template> {
    Template::parse(input)
}
