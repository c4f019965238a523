use crate::objects::Dictionary;
use std::fmt;

/// Identifier of an indirect object: object number plus generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// A PDF value. Dictionary entries, array elements and indirect objects
/// are all `Object`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

impl Object {
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value; integers coerce to `f64`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Dictionary view; streams expose their attribute dictionary.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(dict, _) => Some(dict),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new(12, 0);
        assert_eq!(id.to_string(), "12 0 R");
        assert_eq!(id.number(), 12);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_as_integer_and_real() {
        assert_eq!(Object::Integer(7).as_integer(), Some(7));
        assert_eq!(Object::Integer(7).as_real(), Some(7.0));
        assert_eq!(Object::Real(1.5).as_real(), Some(1.5));
        assert_eq!(Object::Real(1.5).as_integer(), None);
        assert_eq!(Object::Null.as_real(), None);
    }

    #[test]
    fn test_as_name_vs_string() {
        let name = Object::Name("Font".to_string());
        assert_eq!(name.as_name(), Some("Font"));
        assert_eq!(name.as_string(), None);

        let string = Object::String("Font".to_string());
        assert_eq!(string.as_string(), Some("Font"));
        assert_eq!(string.as_name(), None);
    }

    #[test]
    fn test_stream_exposes_dict() {
        let mut dict = Dictionary::new();
        dict.set("Subtype", Object::Name("Image".to_string()));
        let stream = Object::Stream(dict, vec![1, 2, 3]);

        let attrs = stream.as_dict().unwrap();
        assert_eq!(attrs.get("Subtype").and_then(Object::as_name), Some("Image"));
    }

    #[test]
    fn test_as_reference() {
        let obj = Object::Reference(ObjectId::new(3, 1));
        assert_eq!(obj.as_reference(), Some(ObjectId::new(3, 1)));
        assert_eq!(Object::Null.as_reference(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Object::from(true), Object::Boolean(true));
        assert_eq!(Object::from(5i32), Object::Integer(5));
        assert_eq!(Object::from(2.5f64), Object::Real(2.5));
        assert_eq!(Object::from("hi"), Object::String("hi".to_string()));
        assert_eq!(
            Object::from(ObjectId::new(1, 0)),
            Object::Reference(ObjectId::new(1, 0))
        );
    }
}
