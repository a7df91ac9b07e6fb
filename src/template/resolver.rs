// Template expansion

use super::ast::{Template, TemplatePart};
use super::encoding::starts_with_triplet;
use crate::error::{Error, Result, SyntaxError};
use crate::value::Variables;

/// Expands a template against a set of variable bindings
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve template with provided variable values
    pub fn resolve(&self, template: &Template, values: &Variables) -> Result<String> {
        let mut result = String::new();
        let mut expressions = 0usize;

        for part in template.parts() {
            match part {
                TemplatePart::Literal(literal) => {
                    if let Err(err) = validate_literal(literal) {
                        tracing::debug!(error = %err, "rejected template literal");
                        return Err(err);
                    }
                    result.push_str(literal);
                }
                TemplatePart::Expression(expr) => {
                    let expanded = expr.expand(values).inspect_err(|err| {
                        tracing::debug!(error = %err, "expression expansion failed");
                    })?;
                    result.push_str(&expanded);
                    expressions += 1;
                }
            }
        }

        // Purely literal templates are rejected on purpose
        if expressions == 0 {
            tracing::debug!("template has no expressions");
            return Err(Error::expanding("Template has no expressions"));
        }

        tracing::trace!(expressions, length = result.len(), "expanded template");
        Ok(result)
    }
}

/// Check literal text against the characters RFC 6570 forbids outside
/// expressions. A `%` is only allowed as the start of a `%XX` triplet.
pub(crate) fn validate_literal(literal: &str) -> Result<()> {
    if literal.is_empty() {
        return Err(SyntaxError::new("Invalid literal: empty literal segment").into());
    }

    for (pos, ch) in literal.char_indices() {
        let illegal = match ch {
            '%' => !starts_with_triplet(&literal[pos..]),
            c if (c as u32) <= 0x20 => true,
            '\u{7f}'..='\u{9f}' => true,
            '"' | '\'' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => true,
            _ => false,
        };

        if illegal {
            return Err(SyntaxError::new(format!("Invalid literal: {:?}", literal))
                .expected("a literal character or %XX triplet")
                .found(Some(ch))
                .at(pos)
                .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ast::{Expression, Operator, VariableSpec};
    use crate::template::parser::TemplateParser;

    fn values() -> Variables {
        Variables::new().with("query", "rust templates").with("page", "2")
    }

    #[test]
    fn test_resolve_simple_variable() {
        let template = TemplateParser::parse("https://example.com/{query}").unwrap();
        let result = TemplateResolver::new().resolve(&template, &values()).unwrap();
        assert_eq!(result, "https://example.com/rust%20templates");
    }

    #[test]
    fn test_resolve_query_expression() {
        let template = TemplateParser::parse("https://example.com/search{?query,page,missing}").unwrap();
        let result = TemplateResolver::new().resolve(&template, &values()).unwrap();
        assert_eq!(result, "https://example.com/search?query=rust%20templates&page=2");
    }

    #[test]
    fn test_resolve_all_missing_still_counts_as_expression() {
        let template = TemplateParser::parse("/path{/missing}").unwrap();
        let result = TemplateResolver::new().resolve(&template, &Variables::new()).unwrap();
        assert_eq!(result, "/path");
    }

    #[test]
    fn test_resolve_without_expressions_fails() {
        let template = TemplateParser::parse("just/literal/text").unwrap();
        let err = TemplateResolver::new().resolve(&template, &values()).unwrap_err();
        assert_eq!(err, Error::Expanding("Template has no expressions".to_string()));

        let empty = TemplateParser::parse("").unwrap();
        assert!(TemplateResolver::new()
            .resolve(&empty, &values())
            .unwrap_err()
            .is_expanding());
    }

    #[test]
    fn test_resolve_rejects_invalid_literal() {
        let template = Template::new(vec![
            TemplatePart::Literal("bad literal".to_string()),
            TemplatePart::Expression(Expression::new(Operator::Simple, vec![VariableSpec::new("page")])),
        ]);
        let err = TemplateResolver::new().resolve(&template, &values()).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_validate_literal() {
        assert!(validate_literal("https://example.com/a;b?c=d&e#f").is_ok());
        assert!(validate_literal("caf%C3%A9").is_ok());
        assert!(validate_literal("\u{e9}t\u{e9}").is_ok());
        assert!(validate_literal("[::1]").is_ok());

        for bad in ["", " lead", "a b", "tab\t", "50%", "%zz", "<", ">", "\\", "^", "`", "{", "|", "}", "\"", "'"] {
            let err = validate_literal(bad).unwrap_err();
            assert!(err.is_syntax(), "expected syntax error for {:?}", bad);
        }
    }

    #[test]
    fn test_validate_literal_rejects_c1_controls() {
        for bad in ["x\u{80}", "\u{85}", "a\u{9f}b"] {
            assert!(validate_literal(bad).unwrap_err().is_syntax(), "{:?}", bad);
        }
        assert!(validate_literal("\u{a0}").is_ok());

        let template = TemplateParser::parse("x\u{80}{page}").unwrap();
        assert!(TemplateResolver::new()
            .resolve(&template, &values())
            .unwrap_err()
            .is_syntax());
    }

    #[test]
    fn test_validate_literal_reports_position() {
        match validate_literal("abc>def").unwrap_err() {
            Error::Syntax(err) => {
                assert_eq!(err.position, Some(3));
                assert_eq!(err.found.as_deref(), Some(">"));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }
}
