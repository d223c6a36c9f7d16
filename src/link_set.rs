use crate::{DecodeError, Link};
use log::debug;
use serde::de::{self, value::MapAccessDeserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::iter::FromIterator;

/// All links under one relation, in document order.
///
/// HAL allows a relation to hold either a single link object or an array of
/// them. Both shapes decode to a `LinkSet`; a single object becomes a
/// one-element set. A set always serializes as an array.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct LinkSet(Vec<Link>);

impl LinkSet {
    /// Normalizes a link object or an array of link objects.
    ///
    /// Only the top-level shape decides between the two readings. A field of
    /// the wrong type inside a link object is reported as
    /// [`DecodeError::FieldTypeError`] and never retried as the other shape.
    pub fn from_value(value: &Value) -> Result<LinkSet, DecodeError> {
        match value {
            Value::Object(_) => Ok(LinkSet(vec![Link::deserialize(value)?])),
            Value::Array(items) => {
                debug!("Reading {} link objects from an array.", items.len());

                let mut links = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    if !item.is_object() {
                        return Err(DecodeError::ShapeMismatch(format!(
                            "Expected a link object at index {}, found {}.",
                            index,
                            kind(item)
                        )));
                    }

                    let link = match Link::deserialize(item) {
                        Ok(link) => link,
                        Err(err) => {
                            return Err(DecodeError::FieldTypeError(format!(
                                "Invalid link field at index {} ({}).",
                                index, err
                            )))
                        }
                    };
                    links.push(link);
                }
                Ok(LinkSet(links))
            }
            other => Err(DecodeError::ShapeMismatch(format!(
                "Expected a link object or an array of link objects, found {}.",
                kind(other)
            ))),
        }
    }

    pub fn parse(text: &str) -> Result<LinkSet, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        LinkSet::from_value(&value)
    }

    pub fn first(&self) -> Option<&Link> {
        self.0.first()
    }

    /// Selects a link by its `name` attribute.
    pub fn find_by_name(&self, name: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.name.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Link> {
        self.0
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<'de> Deserialize<'de> for LinkSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LinkSetVisitor;

        impl<'de> Visitor<'de> for LinkSetVisitor {
            type Value = LinkSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a link object or an array of link objects")
            }

            fn visit_map<A>(self, map: A) -> Result<LinkSet, A::Error>
            where
                A: MapAccess<'de>,
            {
                Ok(LinkSet(vec![link_from_map(map)?]))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<LinkSet, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut links = Vec::new();
                while let Some(LinkObject(link)) = seq.next_element()? {
                    links.push(link);
                }
                Ok(LinkSet(links))
            }
        }

        deserializer.deserialize_any(LinkSetVisitor)
    }
}

// Buffers the object first so that a repeated key keeps its last value, as
// `from_value` does.
fn link_from_map<'de, A>(map: A) -> Result<Link, A::Error>
where
    A: MapAccess<'de>,
{
    let object = Map::<String, Value>::deserialize(MapAccessDeserializer::new(map))?;
    Link::deserialize(&Value::Object(object)).map_err(de::Error::custom)
}

// Array elements must be objects. The derived `Link` impl would also accept
// a positional array.
struct LinkObject(Link);

impl<'de> Deserialize<'de> for LinkObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LinkObjectVisitor;

        impl<'de> Visitor<'de> for LinkObjectVisitor {
            type Value = LinkObject;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a link object")
            }

            fn visit_map<A>(self, map: A) -> Result<LinkObject, A::Error>
            where
                A: MapAccess<'de>,
            {
                link_from_map(map).map(LinkObject)
            }
        }

        deserializer.deserialize_map(LinkObjectVisitor)
    }
}

impl From<Vec<Link>> for LinkSet {
    fn from(links: Vec<Link>) -> Self {
        LinkSet(links)
    }
}

impl From<Link> for LinkSet {
    fn from(link: Link) -> Self {
        LinkSet(vec![link])
    }
}

impl FromIterator<Link> for LinkSet {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        LinkSet(iter.into_iter().collect())
    }
}

impl IntoIterator for LinkSet {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_is_one_element_set() {
        let set = LinkSet::from_value(&json!({ "href": "/users/1" })).unwrap();
        assert_eq!(set, LinkSet::from(Link::new("/users/1")));
    }

    #[test]
    fn array_keeps_document_order() {
        let set = LinkSet::from_value(&json!([
            { "href": "/a" },
            { "href": "/b", "title": "B" },
        ]))
        .unwrap();
        assert_eq!(
            set.into_inner(),
            vec![Link::new("/a"), Link::new("/b").with_title("B")]
        );
    }

    #[test]
    fn field_error_in_object_is_not_retried() {
        let err = LinkSet::from_value(&json!({ "href": "/x", "templated": "yes" })).unwrap_err();
        assert!(matches!(err, DecodeError::FieldTypeError(_)));
    }

    #[test]
    fn non_object_element_is_shape_mismatch() {
        let err = LinkSet::from_value(&json!([{ "href": "/a" }, "/b"])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShapeMismatch(String::from(
                "Expected a link object at index 1, found a string."
            ))
        );
    }

    #[test]
    fn scalars_are_shape_mismatch() {
        for value in &[json!(null), json!(true), json!(7), json!("not-an-object")] {
            assert!(matches!(
                LinkSet::from_value(value),
                Err(DecodeError::ShapeMismatch(_))
            ));
        }
    }

    #[test]
    fn serde_path_matches_value_path() {
        let set: LinkSet = serde_json::from_str(r#"[{"href":"/a"},{"href":"/b"}]"#).unwrap();
        assert_eq!(set.len(), 2);

        let set: LinkSet = serde_json::from_str(r#"{"href":"/a","templated":true}"#).unwrap();
        assert_eq!(set.first(), Some(&Link::new("/a").with_templated(true)));

        assert!(serde_json::from_str::<LinkSet>(r#"[["/a"]]"#).is_err());
        assert!(serde_json::from_str::<LinkSet>(r#""/a""#).is_err());
        assert!(serde_json::from_str::<LinkSet>(r#"[{"href":"/a","templated":"yes"}]"#).is_err());
    }

    #[test]
    fn repeated_key_keeps_last_value_on_both_paths() {
        let text = r#"{"href":"/a","href":"/b"}"#;
        let expected = LinkSet::from(Link::new("/b"));

        assert_eq!(LinkSet::parse(text).unwrap(), expected);
        assert_eq!(serde_json::from_str::<LinkSet>(text).unwrap(), expected);

        let text = r#"[{"href":"/a","title":"A","title":"B"}]"#;
        let expected = LinkSet::from(Link::new("/a").with_title("B"));
        assert_eq!(LinkSet::parse(text).unwrap(), expected);
        assert_eq!(serde_json::from_str::<LinkSet>(text).unwrap(), expected);
    }

    #[test]
    fn empty_array_is_empty_set() {
        let set = LinkSet::parse("[]").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn finds_by_name() {
        let set = LinkSet::from(vec![
            Link::new("/en").with_name("en"),
            Link::new("/sv").with_name("sv"),
        ]);
        assert_eq!(set.find_by_name("sv").map(|l| l.href.as_str()), Some("/sv"));
        assert_eq!(set.find_by_name("de"), None);
    }
}
