// Template parser using recursive descent
//
// Expressions follow the RFC 6570 ABNF. Text outside expressions is
// collected into literal runs and validated at expansion time.

use super::ast::{Expression, Operator, Template, TemplatePart, VariableSpec};
use crate::error::{Error, Result, SyntaxError};

const MAX_LENGTH_DIGITS: usize = 4;

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        parser.parse_template().inspect_err(|err| {
            tracing::debug!(error = %err, template, "failed to parse template");
        })
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_start = self.pos;

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                // Flush literal run before the expression
                if literal_start < self.pos {
                    parts.push(TemplatePart::Literal(self.input[literal_start..self.pos].to_string()));
                }
                let expr = self.parse_expression()?;
                parts.push(TemplatePart::Expression(expr));
                literal_start = self.pos;
            } else {
                self.pos += ch.len_utf8();
            }
        }

        if literal_start < self.pos {
            parts.push(TemplatePart::Literal(self.input[literal_start..].to_string()));
        }

        Ok(Template::new(parts))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.expect_char('{')?;

        let operator = self.parse_operator()?;

        let mut variables = vec![self.parse_varspec()?];
        while self.peek_char() == Some(',') {
            self.pos += 1;
            variables.push(self.parse_varspec()?);
        }

        match self.peek_char() {
            Some('}') => {
                self.pos += 1;
                Ok(Expression::new(operator, variables))
            }
            None => Err(self.error("Unterminated expression", "'}'")),
            Some(_) => Err(self.error("Unexpected character in expression", "',' or '}'")),
        }
    }

    fn parse_operator(&mut self) -> Result<Operator> {
        match self.peek_char() {
            Some(ch @ ('+' | '#' | '.' | '/' | ';' | '?' | '&')) => {
                self.pos += 1;
                Operator::from_symbol(Some(ch))
            }
            // Reserved for future extensions
            Some('=' | ',' | '!' | '@' | '|') => {
                Err(self.error("Invalid expression operator", "an operator or variable name"))
            }
            _ => Ok(Operator::Simple),
        }
    }

    fn parse_varspec(&mut self) -> Result<VariableSpec> {
        let name = self.parse_varname()?;
        let mut spec = VariableSpec::new(name);

        match self.peek_char() {
            Some(':') => {
                self.pos += 1;
                spec.max_length = Some(self.parse_max_length()?);
                if self.peek_char() == Some('*') {
                    return Err(self.error(
                        "Prefix and explode modifiers cannot be combined",
                        "',' or '}'",
                    ));
                }
            }
            Some('*') => {
                self.pos += 1;
                spec.explode = true;
            }
            _ => {}
        }

        Ok(spec)
    }

    fn parse_varname(&mut self) -> Result<String> {
        let start = self.pos;

        loop {
            if !self.consume_varchar() {
                return Err(self.error("Invalid variable name", "a variable name character"));
            }
            while self.consume_varchar() {}

            // Dots may only separate varchars
            if self.peek_char() == Some('.') {
                self.pos += 1;
            } else {
                break;
            }
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_max_length(&mut self) -> Result<usize> {
        let start = self.pos;

        match self.peek_char() {
            Some(ch) if ('1'..='9').contains(&ch) => self.pos += 1,
            _ => return Err(self.error("Invalid prefix modifier", "a digit 1-9")),
        }
        while self.pos - start < MAX_LENGTH_DIGITS
            && self.peek_char().is_some_and(|ch| ch.is_ascii_digit())
        {
            self.pos += 1;
        }

        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.error("Invalid prefix modifier", "a number between 1 and 9999"))
    }

    /// ALPHA / DIGIT / "_" / pct-encoded
    fn consume_varchar(&mut self) -> bool {
        match self.peek_char() {
            Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
                self.pos += 1;
                true
            }
            Some('%') if super::encoding::starts_with_triplet(&self.input[self.pos..]) => {
                self.pos += 3;
                true
            }
            _ => false,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            _ => Err(self.error("Unexpected character", &format!("'{}'", expected))),
        }
    }

    fn error(&self, message: &str, expected: &str) -> Error {
        SyntaxError::new(message)
            .expected(expected)
            .found(self.peek_char())
            .at(self.pos)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_error(input: &str) -> SyntaxError {
        match TemplateParser::parse(input) {
            Err(Error::Syntax(err)) => err,
            other => panic!("Expected syntax error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_parse_simple_variable() {
        let template = TemplateParser::parse("https://example.com/{query}").unwrap();
        assert_eq!(template.parts().len(), 2);

        match &template.parts()[0] {
            TemplatePart::Literal(s) => assert_eq!(s, "https://example.com/"),
            _ => panic!("Expected literal"),
        }

        match &template.parts()[1] {
            TemplatePart::Expression(expr) => {
                assert_eq!(expr.operator, Operator::Simple);
                assert_eq!(expr.variables, vec![VariableSpec::new("query")]);
            }
            _ => panic!("Expected expression"),
        }
    }

    #[test]
    fn test_parse_operators() {
        let cases = [
            ("{+v}", Operator::Reserved),
            ("{#v}", Operator::Fragment),
            ("{.v}", Operator::Label),
            ("{/v}", Operator::PathSegment),
            ("{;v}", Operator::PathParameter),
            ("{?v}", Operator::Query),
            ("{&v}", Operator::QueryContinuation),
        ];
        for (input, op) in cases {
            let template = TemplateParser::parse(input).unwrap();
            let expr = template.expressions().next().unwrap();
            assert_eq!(expr.operator, op, "{}", input);
        }
    }

    #[test]
    fn test_parse_modifiers() {
        let template = TemplateParser::parse("{/list*,path:4}").unwrap();
        let vars = template.variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0], &VariableSpec::new("list").with_explode(true));
        assert_eq!(vars[1], &VariableSpec::new("path").with_max_length(4));
    }

    #[test]
    fn test_parse_max_length_bounds() {
        let template = TemplateParser::parse("{var:9999}").unwrap();
        assert_eq!(template.variables()[0].max_length, Some(9999));

        assert!(TemplateParser::parse("{var:0}").is_err());
        assert!(TemplateParser::parse("{var:10000}").is_err());
        assert!(TemplateParser::parse("{var:prefix}").is_err());
    }

    #[test]
    fn test_parse_dotted_and_encoded_names() {
        let template = TemplateParser::parse("{last.name,first%20name,_id}").unwrap();
        let names: Vec<&str> = template.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["last.name", "first%20name", "_id"]);

        assert!(TemplateParser::parse("{.name.}").is_err());
        assert!(TemplateParser::parse("{a..b}").is_err());
    }

    #[test]
    fn test_parse_literal_runs_are_kept_whole() {
        let template = TemplateParser::parse("/a/b{x}c}d").unwrap();
        assert_eq!(
            template.parts(),
            &[
                TemplatePart::Literal("/a/b".to_string()),
                TemplatePart::Expression(Expression::new(Operator::Simple, vec![VariableSpec::new("x")])),
                TemplatePart::Literal("c}d".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_unterminated_expression() {
        let err = syntax_error("{/id*");
        assert_eq!(err.message, "Unterminated expression");
        assert_eq!(err.position, Some(5));
        assert_eq!(err.found, None);
        assert_eq!(err.expected.as_deref(), Some("'}'"));
    }

    #[test]
    fn test_parse_reserved_operator() {
        let err = syntax_error("{!hello}");
        assert_eq!(err.message, "Invalid expression operator");
        assert_eq!(err.found.as_deref(), Some("!"));
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_parse_prefix_with_explode_fails() {
        let err = syntax_error("{hello:2*}");
        assert!(err.message.contains("cannot be combined"));
    }

    #[test]
    fn test_parse_whitespace_is_rejected() {
        assert!(TemplateParser::parse("{with space}").is_err());
        assert!(TemplateParser::parse("{ leading_space}").is_err());
        assert!(TemplateParser::parse("{trailing_space }").is_err());
        assert!(TemplateParser::parse("/resolution{?x, y}").is_err());
    }

    #[test]
    fn test_parse_empty_expression_fails() {
        let err = syntax_error("x{}");
        assert_eq!(err.message, "Invalid variable name");
        assert_eq!(err.position, Some(2));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "http://example.com{/path*}{?q,lang:2}{#frag}";
        assert_eq!(
            TemplateParser::parse(input).unwrap(),
            TemplateParser::parse(input).unwrap()
        );
    }
}
