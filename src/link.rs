use serde::{Deserialize, Deserializer, Serialize};

/// A HAL link object.
///
/// Only `href` is required by HAL, but it is not checked here: a link object
/// without one decodes to an empty `href`. Every other attribute is optional,
/// and an empty string is treated the same as an absent one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// A URI, or a URI Template when `templated` is set.
    #[serde(default, deserialize_with = "href")]
    pub href: String,

    #[serde(default, deserialize_with = "flag", skip_serializing_if = "is_false")]
    pub templated: bool,

    /// Media type hint for the target resource.
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub r#type: Option<String>,

    /// URL describing the deprecation. Its presence marks the link as deprecated.
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub deprecation: Option<String>,

    /// Secondary key among links sharing a relation.
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub profile: Option<String>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_absent"
    )]
    pub hreflang: Option<String>,
}

impl Link {
    pub fn new<S: Into<String>>(href: S) -> Link {
        Link {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn with_templated(mut self, templated: bool) -> Link {
        self.templated = templated;
        self
    }

    pub fn with_type<S: Into<String>>(mut self, media_type: S) -> Link {
        self.r#type = present(media_type.into());
        self
    }

    pub fn with_deprecation<S: Into<String>>(mut self, deprecation: S) -> Link {
        self.deprecation = present(deprecation.into());
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Link {
        self.name = present(name.into());
        self
    }

    pub fn with_profile<S: Into<String>>(mut self, profile: S) -> Link {
        self.profile = present(profile.into());
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Link {
        self.title = present(title.into());
        self
    }

    pub fn with_hreflang<S: Into<String>>(mut self, hreflang: S) -> Link {
        self.hreflang = present(hreflang.into());
        self
    }

    pub fn is_templated(&self) -> bool {
        self.templated
    }

    pub fn is_deprecated(&self) -> bool {
        !is_absent(&self.deprecation)
    }
}

fn present(value: String) -> Option<String> {
    Some(value).filter(|s| !s.is_empty())
}

fn href<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// `null` reads as false; non-boolean values are rejected.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_absent(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
