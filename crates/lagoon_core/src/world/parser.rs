//! Attribute block parser.
//!
//! Reads `{ ... }` bodies of `type name[=count] = value` declarations into an
//! [`AttributeSet`]. The supported declarations are:
//!
//! - `GLfloat shininess = 32.0`
//! - `GLint w = 64`
//! - `string texture = " pool.tga "`
//! - `vec3 position = { 0 0 5 }`
//! - `vec3 corners [ 4 ] = { 0 0 0  1 0 0  0 1 0  1 1 0 }`
//!
//! `vec2`/`vec4` follow the `vec3` form with two/four floats per element.
//! Strings are a single token between two `"` tokens, so they cannot contain
//! spaces.

use thiserror::Error;

use lagoon_math::{Vec2, Vec3, Vec4};

use super::lexer::{Lexer, Token};
use super::types::{Attribute, AttributeSet, AttributeType, AttributeValue, BlockKind};

/// Errors that can occur while reading a world file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    #[error("Parse error at line {line}: expected \"{expected}\", found \"{found}\"")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("Unknown block type \"{keyword}\" at line {line}")]
    UnknownBlock { line: usize, keyword: String },

    #[error("Unknown attribute type \"{keyword}\" at line {line}")]
    UnknownAttributeType { line: usize, keyword: String },

    #[error("Invalid integer \"{token}\" at line {line}")]
    InvalidInt { line: usize, token: String },

    #[error("Invalid float \"{token}\" at line {line}")]
    InvalidFloat { line: usize, token: String },

    #[error("Attribute count must be at least 1, got {count} at line {line}")]
    InvalidCount { line: usize, count: i32 },

    #[error("Repeated attribute name \"{name}\" at line {line}")]
    DuplicateAttribute { line: usize, name: String },

    #[error("Attribute \"{name}\" not found (expected {ty}[{count}])")]
    AttributeNotFound {
        name: String,
        ty: AttributeType,
        count: usize,
    },

    #[error("Attribute \"{name}\" is {found_ty}[{found_count}], expected {expected_ty}[{expected_count}]")]
    AttributeMismatch {
        name: String,
        expected_ty: AttributeType,
        expected_count: usize,
        found_ty: AttributeType,
        found_count: usize,
    },

    #[error("Grid mesh needs at least 2x2 vertices, got {w}x{h}")]
    DegenerateGrid { w: i32, h: i32 },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Token-level reader for world files.
///
/// Wraps a [`Lexer`] and knows how to read block keywords, attribute blocks
/// and typed values. It never looks ahead: every read consumes a token.
pub struct WorldParser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> WorldParser<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lexer: Lexer::new(content),
        }
    }

    /// Current line of the underlying lexer.
    pub fn line(&self) -> usize {
        self.lexer.line()
    }

    /// Read the next top-level block keyword, or `None` at end of input.
    pub fn next_block(&mut self) -> ParseResult<Option<(BlockKind, usize)>> {
        let token = match self.lexer.next_token() {
            Some(token) => token,
            None => return Ok(None),
        };

        match BlockKind::from_keyword(token.as_str()) {
            Some(kind) => Ok(Some((kind, token.line))),
            None => Err(ParseError::UnknownBlock {
                line: token.line,
                keyword: token.text,
            }),
        }
    }

    /// Read one bare token (used for material names).
    pub fn parse_name(&mut self) -> ParseResult<String> {
        Ok(self.lexer.expect_token("a name")?.text)
    }

    /// Read a complete `{ ... }` attribute block.
    pub fn parse_attribute_set(&mut self) -> ParseResult<AttributeSet> {
        self.lexer.check_next("{")?;

        let mut set = AttributeSet::new();
        while let Some(attribute) = self.parse_attribute()? {
            set.push(attribute)?;
        }

        Ok(set)
    }

    /// Read one attribute, or `None` when the closing `}` is reached.
    fn parse_attribute(&mut self) -> ParseResult<Option<Attribute>> {
        let type_token = self.lexer.expect_token("an attribute type or \"}\"")?;
        if type_token.is("}") {
            return Ok(None);
        }

        let line = type_token.line;
        let ty = AttributeType::from_keyword(type_token.as_str()).ok_or_else(|| {
            ParseError::UnknownAttributeType {
                line,
                keyword: type_token.text.clone(),
            }
        })?;

        let name = self.lexer.expect_token("an attribute name")?.text;
        let count = self.parse_count()?;

        let value = match ty {
            AttributeType::Float => AttributeValue::Float(self.parse_float()?),
            AttributeType::Int => AttributeValue::Int(self.parse_int()?),
            AttributeType::String => AttributeValue::String(self.parse_string()?),
            AttributeType::Vec2 => AttributeValue::Vec2(
                self.parse_vectors::<2>(count)?
                    .into_iter()
                    .map(Vec2::from_array)
                    .collect(),
            ),
            AttributeType::Vec3 => AttributeValue::Vec3(
                self.parse_vectors::<3>(count)?
                    .into_iter()
                    .map(Vec3::from_array)
                    .collect(),
            ),
            AttributeType::Vec4 => AttributeValue::Vec4(
                self.parse_vectors::<4>(count)?
                    .into_iter()
                    .map(Vec4::from_array)
                    .collect(),
            ),
        };

        Ok(Some(Attribute {
            name,
            count,
            value,
            line,
        }))
    }

    /// Read `=` (count 1) or `[ n ] =`.
    fn parse_count(&mut self) -> ParseResult<usize> {
        let token = self.lexer.expect_token("\"=\" or \"[\"")?;

        if token.is("=") {
            return Ok(1);
        }

        if token.is("[") {
            let line = self.line();
            let count = self.parse_int()?;
            self.lexer.check_next("]")?;
            self.lexer.check_next("=")?;

            return usize::try_from(count)
                .ok()
                .filter(|&n| n >= 1)
                .ok_or(ParseError::InvalidCount { line, count });
        }

        Err(ParseError::UnexpectedToken {
            line: token.line,
            expected: "= or [".to_string(),
            found: token.text,
        })
    }

    /// Read a whole-token base-10 integer within `i32` range.
    pub fn parse_int(&mut self) -> ParseResult<i32> {
        let token = self.lexer.expect_token("an integer")?;
        parse_int_token(&token)
    }

    /// Read a whole-token float.
    pub fn parse_float(&mut self) -> ParseResult<f32> {
        let token = self.lexer.expect_token("a float")?;
        parse_float_token(&token)
    }

    /// Read `" token "` and return the inner token.
    pub fn parse_string(&mut self) -> ParseResult<String> {
        self.lexer.check_next("\"")?;
        let value = self.lexer.expect_token("a string")?.text;
        self.lexer.check_next("\"")?;
        Ok(value)
    }

    /// Read `{` followed by `count` groups of `N` floats and `}`.
    fn parse_vectors<const N: usize>(&mut self, count: usize) -> ParseResult<Vec<[f32; N]>> {
        self.lexer.check_next("{")?;

        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            let mut element = [0.0; N];
            for component in element.iter_mut() {
                *component = self.parse_float()?;
            }
            result.push(element);
        }

        self.lexer.check_next("}")?;
        Ok(result)
    }
}

fn parse_int_token(token: &Token) -> ParseResult<i32> {
    token.as_str().parse::<i32>().map_err(|_| ParseError::InvalidInt {
        line: token.line,
        token: token.text.clone(),
    })
}

fn parse_float_token(token: &Token) -> ParseResult<f32> {
    let invalid = || ParseError::InvalidFloat {
        line: token.line,
        token: token.text.clone(),
    };

    let value = token.as_str().parse::<f32>().map_err(|_| invalid())?;

    // Finite-looking literals that overflow are out of range, not infinity.
    if value.is_infinite() && !token.as_str().to_ascii_lowercase().contains("inf") {
        return Err(invalid());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_set(input: &str) -> ParseResult<AttributeSet> {
        WorldParser::new(input).parse_attribute_set()
    }

    #[test]
    fn test_parse_scalars() {
        let set = parse_set(
            r#"{
    GLfloat shininess = 32.5
    GLint w = -7
    string texture = " pool.tga "
}"#,
        )
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.float("shininess").unwrap(), 32.5);
        assert_eq!(set.int("w").unwrap(), -7);
        assert_eq!(set.string("texture").unwrap(), "pool.tga");
    }

    #[test]
    fn test_parse_string_without_spaces_around_quotes() {
        let set = parse_set(r#"{ string material = "stone" }"#).unwrap();
        assert_eq!(set.string("material").unwrap(), "stone");
    }

    #[test]
    fn test_parse_vectors_with_count() {
        let set = parse_set(
            "{
    vec3 corners [ 4 ] = { 0 0 0  1 0 0  0 1 0  1 1 0 }
    vec2 uv[2] = { 0 0 1 1 }
    vec4 diffuse = { 0.1 0.2 0.3 1.0 }
}",
        )
        .unwrap();

        assert_eq!(
            set.vec3s("corners", 4).unwrap(),
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ]
        );
        assert_eq!(set.vec2s("uv", 2).unwrap(), &[Vec2::ZERO, Vec2::ONE]);
        assert_eq!(set.vec4("diffuse").unwrap(), Vec4::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn test_lookup_independent_of_declaration_order() {
        let a = parse_set("{ GLfloat x = 1 GLint n = 2 vec3 p = { 1 2 3 } }").unwrap();
        let b = parse_set("{ vec3 p = { 1 2 3 } GLint n = 2 GLfloat x = 1 }").unwrap();

        for set in [&a, &b] {
            assert_eq!(set.float("x").unwrap(), 1.0);
            assert_eq!(set.int("n").unwrap(), 2);
            assert_eq!(set.vec3("p").unwrap(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_empty_block() {
        assert!(parse_set("{ }").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_attribute_fails() {
        let err = parse_set("{ GLfloat z = 1 GLfloat z = 1 }").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateAttribute { .. }));

        let err = parse_set("{ GLfloat z = 1 vec3 z = { 0 0 1 } }").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateAttribute { .. }));
    }

    #[test]
    fn test_unknown_attribute_type() {
        let err = parse_set("{ float z = 1 }").unwrap_err();
        assert!(matches!(err, ParseError::UnknownAttributeType { ref keyword, .. } if keyword == "float"));
    }

    #[test]
    fn test_missing_open_brace() {
        let err = parse_set("GLfloat z = 1 }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == "GLfloat"));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_set("{ GLfloat z = 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_bad_assignment_token() {
        let err = parse_set("{ GLfloat z : 1 }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == ":"));
    }

    #[test]
    fn test_numbers_must_consume_whole_token() {
        assert!(matches!(
            parse_set("{ GLint w = 12abc }").unwrap_err(),
            ParseError::InvalidInt { .. }
        ));
        assert!(matches!(
            parse_set("{ GLfloat z = 1.5f }").unwrap_err(),
            ParseError::InvalidFloat { .. }
        ));
        assert!(matches!(
            parse_set("{ GLint w = 1.0 }").unwrap_err(),
            ParseError::InvalidInt { .. }
        ));
    }

    #[test]
    fn test_int_range() {
        assert_eq!(parse_set("{ GLint w = 2147483647 }").unwrap().int("w").unwrap(), i32::MAX);
        assert!(matches!(
            parse_set("{ GLint w = 2147483648 }").unwrap_err(),
            ParseError::InvalidInt { .. }
        ));
    }

    #[test]
    fn test_float_overflow_rejected() {
        assert!(matches!(
            parse_set("{ GLfloat z = 1e40 }").unwrap_err(),
            ParseError::InvalidFloat { .. }
        ));
    }

    #[test]
    fn test_invalid_count() {
        assert!(matches!(
            parse_set("{ vec3 p [ 0 ] = { } }").unwrap_err(),
            ParseError::InvalidCount { count: 0, .. }
        ));
        assert!(matches!(
            parse_set("{ vec3 p [ -2 ] = { } }").unwrap_err(),
            ParseError::InvalidCount { count: -2, .. }
        ));
    }

    #[test]
    fn test_vector_arity_enforced() {
        // Too few floats: the closing brace is read where a float is expected.
        assert!(matches!(
            parse_set("{ vec3 p = { 1 2 } }").unwrap_err(),
            ParseError::InvalidFloat { ref token, .. } if token == "}"
        ));
        // Too many floats: the extra value is found where "}" is expected.
        assert!(matches!(
            parse_set("{ vec2 p = { 1 2 3 } }").unwrap_err(),
            ParseError::UnexpectedToken { ref found, .. } if found == "3"
        ));
    }

    #[test]
    fn test_next_block() {
        let mut parser = WorldParser::new("Cube\n// c\nOpenCube Sphere");
        assert_eq!(parser.next_block().unwrap(), Some((BlockKind::Cube, 1)));
        assert_eq!(parser.next_block().unwrap(), Some((BlockKind::OpenCube, 3)));
        assert!(matches!(
            parser.next_block(),
            Err(ParseError::UnknownBlock { ref keyword, line: 3 }) if keyword == "Sphere"
        ));
    }

    #[test]
    fn test_error_messages_name_the_construct() {
        let err = parse_set("{ GLint w = oops }").unwrap_err();
        assert_eq!(err.to_string(), "Invalid integer \"oops\" at line 1");

        let set = parse_set("{ }").unwrap();
        let err = set.vec3s("corners", 4).unwrap_err();
        assert_eq!(err.to_string(), "Attribute \"corners\" not found (expected vec3[4])");
    }
}
