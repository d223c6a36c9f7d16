use crate::link_set::kind;
use crate::{DecodeError, Link, LinkSet};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map;
use std::collections::HashMap;

/// Links of a resource, keyed by relation name.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Links(HashMap<String, LinkSet>);

impl Links {
    pub fn new() -> Links {
        Links(HashMap::new())
    }

    /// Reads a `_links` object, normalizing each relation.
    pub fn from_value(value: &Value) -> Result<Links, DecodeError> {
        let members = match value {
            Value::Object(members) => members,
            _ => {
                return Err(DecodeError::ShapeMismatch(format!(
                    "Expected an object of link relations, found {}.",
                    kind(value)
                )))
            }
        };

        let mut links = HashMap::with_capacity(members.len());
        for (rel, value) in members {
            let set = LinkSet::from_value(value).map_err(|err| err.in_relation(rel))?;
            links.insert(rel.clone(), set);
        }
        Ok(Links(links))
    }

    pub fn parse(text: &str) -> Result<Links, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        Links::from_value(&value)
    }

    pub fn get(&self, rel: &str) -> Option<&LinkSet> {
        self.0.get(rel)
    }

    /// First link of a relation.
    pub fn first(&self, rel: &str) -> Option<&Link> {
        let link = self.get(rel)?.first()?;
        notify_deprecated(rel, link);
        Some(link)
    }

    /// Link of a relation selected by its `name` attribute.
    pub fn find(&self, rel: &str, name: &str) -> Option<&Link> {
        let link = self.get(rel)?.find_by_name(name)?;
        notify_deprecated(rel, link);
        Some(link)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    /// Replaces the set stored under `rel`, returning the previous one.
    pub fn insert<S, L>(&mut self, rel: S, set: L) -> Option<LinkSet>
    where
        S: Into<String>,
        L: Into<LinkSet>,
    {
        self.0.insert(rel.into(), set.into())
    }

    pub fn rels(&self) -> hash_map::Keys<'_, String, LinkSet> {
        self.0.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, LinkSet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn notify_deprecated(rel: &str, link: &Link) {
    if link.is_deprecated() {
        warn!(
            "Link \"{}\" to {} is deprecated (see {}).",
            rel,
            link.href,
            link.deprecation.as_deref().unwrap_or_default()
        );
    }
}

impl From<HashMap<String, LinkSet>> for Links {
    fn from(links: HashMap<String, LinkSet>) -> Self {
        Links(links)
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = (&'a String, &'a LinkSet);
    type IntoIter = hash_map::Iter<'a, String, LinkSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
