//! Attribute and block types for the intermediate representation.
//!
//! An [`AttributeSet`] holds the parsed body of one `{ ... }` block before an
//! entity builder turns it into a scene type.

use std::fmt;

use lagoon_math::{Vec2, Vec3, Vec4};

use super::parser::{ParseError, ParseResult};

/// Top-level block keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    PointLight,
    Material,
    Square,
    HorizMesh,
    Cube,
    OpenCube,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::PointLight,
        BlockKind::Material,
        BlockKind::Square,
        BlockKind::HorizMesh,
        BlockKind::Cube,
        BlockKind::OpenCube,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::PointLight => "PointLight",
            BlockKind::Material => "Material",
            BlockKind::Square => "Square",
            BlockKind::HorizMesh => "HorizMesh",
            BlockKind::Cube => "Cube",
            BlockKind::OpenCube => "OpenCube",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declared type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    String,
}

impl AttributeType {
    pub const ALL: [AttributeType; 6] = [
        AttributeType::Float,
        AttributeType::Vec2,
        AttributeType::Vec3,
        AttributeType::Vec4,
        AttributeType::Int,
        AttributeType::String,
    ];

    /// Keyword used for this type in world files.
    pub fn keyword(self) -> &'static str {
        match self {
            AttributeType::Float => "GLfloat",
            AttributeType::Vec2 => "vec2",
            AttributeType::Vec3 => "vec3",
            AttributeType::Vec4 => "vec4",
            AttributeType::Int => "GLint",
            AttributeType::String => "string",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.keyword() == keyword)
    }

    /// Number of floats per element for vector types, `None` for scalars.
    pub fn arity(self) -> Option<usize> {
        match self {
            AttributeType::Vec2 => Some(2),
            AttributeType::Vec3 => Some(3),
            AttributeType::Vec4 => Some(4),
            AttributeType::Float | AttributeType::Int | AttributeType::String => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed attribute value. One variant per [`AttributeType`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Float(f32),
    Int(i32),
    String(String),
    Vec2(Vec<Vec2>),
    Vec3(Vec<Vec3>),
    Vec4(Vec<Vec4>),
}

impl AttributeValue {
    pub fn ty(&self) -> AttributeType {
        match self {
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Vec2(_) => AttributeType::Vec2,
            AttributeValue::Vec3(_) => AttributeType::Vec3,
            AttributeValue::Vec4(_) => AttributeType::Vec4,
        }
    }
}

/// One `type name[=count] = value` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,

    /// Declared count (1 when the `[n]` suffix is absent)
    pub count: usize,

    pub value: AttributeValue,

    /// Line the declaration started on
    pub line: usize,
}

impl Attribute {
    pub fn ty(&self) -> AttributeType {
        self.value.ty()
    }
}

/// Ordered, uniquely named attributes of one block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, rejecting a name already present in the set.
    pub fn push(&mut self, attribute: Attribute) -> ParseResult<()> {
        if self.contains(&attribute.name) {
            return Err(ParseError::DuplicateAttribute {
                line: attribute.line,
                name: attribute.name,
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Find the attribute matching `ty`, `name` and `count` exactly.
    ///
    /// A name that exists with another type or count reports
    /// [`ParseError::AttributeMismatch`]; an absent name reports
    /// [`ParseError::AttributeNotFound`].
    pub fn lookup(&self, ty: AttributeType, name: &str, count: usize) -> ParseResult<&AttributeValue> {
        match self.get(name) {
            Some(attr) if attr.ty() == ty && attr.count == count => Ok(&attr.value),
            Some(attr) => Err(ParseError::AttributeMismatch {
                name: name.to_string(),
                expected_ty: ty,
                expected_count: count,
                found_ty: attr.ty(),
                found_count: attr.count,
            }),
            None => Err(ParseError::AttributeNotFound {
                name: name.to_string(),
                ty,
                count,
            }),
        }
    }

    pub fn float(&self, name: &str) -> ParseResult<f32> {
        match self.lookup(AttributeType::Float, name, 1)? {
            AttributeValue::Float(v) => Ok(*v),
            other => Err(mismatch(name, AttributeType::Float, 1, other)),
        }
    }

    pub fn int(&self, name: &str) -> ParseResult<i32> {
        match self.lookup(AttributeType::Int, name, 1)? {
            AttributeValue::Int(v) => Ok(*v),
            other => Err(mismatch(name, AttributeType::Int, 1, other)),
        }
    }

    pub fn string(&self, name: &str) -> ParseResult<&str> {
        match self.lookup(AttributeType::String, name, 1)? {
            AttributeValue::String(v) => Ok(v),
            other => Err(mismatch(name, AttributeType::String, 1, other)),
        }
    }

    pub fn vec2s(&self, name: &str, count: usize) -> ParseResult<&[Vec2]> {
        match self.lookup(AttributeType::Vec2, name, count)? {
            AttributeValue::Vec2(v) if v.len() == count => Ok(v),
            other => Err(mismatch(name, AttributeType::Vec2, count, other)),
        }
    }

    pub fn vec3s(&self, name: &str, count: usize) -> ParseResult<&[Vec3]> {
        match self.lookup(AttributeType::Vec3, name, count)? {
            AttributeValue::Vec3(v) if v.len() == count => Ok(v),
            other => Err(mismatch(name, AttributeType::Vec3, count, other)),
        }
    }

    pub fn vec4s(&self, name: &str, count: usize) -> ParseResult<&[Vec4]> {
        match self.lookup(AttributeType::Vec4, name, count)? {
            AttributeValue::Vec4(v) if v.len() == count => Ok(v),
            other => Err(mismatch(name, AttributeType::Vec4, count, other)),
        }
    }

    pub fn vec3(&self, name: &str) -> ParseResult<Vec3> {
        Ok(self.vec3s(name, 1)?[0])
    }

    pub fn vec4(&self, name: &str) -> ParseResult<Vec4> {
        Ok(self.vec4s(name, 1)?[0])
    }

    /// Exactly `N` vec3 elements, as an array.
    pub fn vec3_array<const N: usize>(&self, name: &str) -> ParseResult<[Vec3; N]> {
        let values = self.vec3s(name, N)?;
        let mut out = [Vec3::ZERO; N];
        out.copy_from_slice(values);
        Ok(out)
    }

    pub fn vec2_array<const N: usize>(&self, name: &str) -> ParseResult<[Vec2; N]> {
        let values = self.vec2s(name, N)?;
        let mut out = [Vec2::ZERO; N];
        out.copy_from_slice(values);
        Ok(out)
    }
}

// Only reachable for sets whose value variant or element count disagrees with
// the declared type and count; the parser never builds those.
fn mismatch(name: &str, ty: AttributeType, count: usize, found: &AttributeValue) -> ParseError {
    let found_count = match found {
        AttributeValue::Vec2(v) => v.len(),
        AttributeValue::Vec3(v) => v.len(),
        AttributeValue::Vec4(v) => v.len(),
        _ => 1,
    };
    ParseError::AttributeMismatch {
        name: name.to_string(),
        expected_ty: ty,
        expected_count: count,
        found_ty: found.ty(),
        found_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, count: usize, value: AttributeValue) -> Attribute {
        Attribute {
            name: name.to_string(),
            count,
            value,
            line: 1,
        }
    }

    #[test]
    fn test_keywords_round_trip() {
        for ty in AttributeType::ALL {
            assert_eq!(AttributeType::from_keyword(ty.keyword()), Some(ty));
        }
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(AttributeType::from_keyword("float"), None);
        assert_eq!(BlockKind::from_keyword("Sphere"), None);
    }

    #[test]
    fn test_duplicate_name_rejected_regardless_of_type() {
        let mut set = AttributeSet::new();
        set.push(attr("z", 1, AttributeValue::Float(1.0))).unwrap();

        let err = set.push(attr("z", 3, AttributeValue::Int(4))).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateAttribute { ref name, .. } if name == "z"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_lookup_exact_match() {
        let mut set = AttributeSet::new();
        set.push(attr("w", 1, AttributeValue::Int(3))).unwrap();
        set.push(attr(
            "corners",
            2,
            AttributeValue::Vec3(vec![Vec3::X, Vec3::Y]),
        ))
        .unwrap();

        assert_eq!(set.int("w").unwrap(), 3);
        assert_eq!(set.vec3s("corners", 2).unwrap(), &[Vec3::X, Vec3::Y]);
    }

    #[test]
    fn test_lookup_missing_vs_mismatched() {
        let mut set = AttributeSet::new();
        set.push(attr("normal", 1, AttributeValue::Vec3(vec![Vec3::Z]))).unwrap();

        assert!(matches!(
            set.lookup(AttributeType::Vec3, "position", 1),
            Err(ParseError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            set.lookup(AttributeType::Vec3, "normal", 6),
            Err(ParseError::AttributeMismatch { found_count: 1, expected_count: 6, .. })
        ));
        assert!(matches!(
            set.float("normal"),
            Err(ParseError::AttributeMismatch { found_ty: AttributeType::Vec3, .. })
        ));
    }

    #[test]
    fn test_iter_preserves_declaration_order() {
        let mut set = AttributeSet::new();
        for name in ["c", "a", "b"] {
            set.push(attr(name, 1, AttributeValue::Float(0.0))).unwrap();
        }
        let names: Vec<&str> = set.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
