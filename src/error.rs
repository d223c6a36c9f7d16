use serde_json::error::Category;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    ShapeMismatch(String),
    FieldTypeError(String),
    MalformedJson(String),
}

impl DecodeError {
    /// Prefixes the message with the relation it was decoded under.
    pub(crate) fn in_relation(self, rel: &str) -> DecodeError {
        match self {
            DecodeError::ShapeMismatch(g) => {
                DecodeError::ShapeMismatch(format!("Relation \"{}\": {}", rel, g))
            }
            DecodeError::FieldTypeError(g) => {
                DecodeError::FieldTypeError(format!("Relation \"{}\": {}", rel, g))
            }
            DecodeError::MalformedJson(g) => {
                DecodeError::MalformedJson(format!("Relation \"{}\": {}", rel, g))
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            DecodeError::ShapeMismatch(g) => g,
            DecodeError::FieldTypeError(g) => g,
            DecodeError::MalformedJson(g) => g,
        };
        write!(f, "{}", text)
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => {
                DecodeError::FieldTypeError(format!("Invalid link field ({}).", err))
            }
            Category::Syntax | Category::Eof | Category::Io => {
                DecodeError::MalformedJson(format!("Could not parse JSON ({}).", err))
            }
        }
    }
}
