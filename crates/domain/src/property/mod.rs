//! Key/value records and their ordered, key-unique container.
//!
//! A [`Property`] is the atomic unit behind variables, headers, query
//! parameters, path variables and auth parameters.

mod list;

pub use list::PropertyList;

/// Type tag marking a property whose `"true"`/`"false"` value is written as a
/// JSON boolean.
pub const BOOLEAN_TYPE: &str = "boolean";

/// A key/value/description/type record.
///
/// The key is fixed once a property is built; a [`PropertyList`] renames its
/// entries through [`PropertyList::rename`] so keys stay unique.
///
/// Equality is structural over all four fields with a missing field compared
/// as the empty string.
#[derive(Debug, Clone, Default)]
pub struct Property {
    key: Option<String>,
    /// The stored value, always kept as text.
    pub value: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Type tag such as `string`, `boolean` or `file`.
    pub property_type: Option<String>,
}

impl Property {
    /// Creates a property with a key and a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Creates a property with a key and no value.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Creates a property with an optional key and an optional value.
    #[must_use]
    pub const fn from_parts(key: Option<String>, value: Option<String>) -> Self {
        Self {
            key,
            value,
            description: None,
            property_type: None,
        }
    }

    /// Creates a `boolean`-typed property.
    #[must_use]
    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, value.to_string()).with_type(BOOLEAN_TYPE)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the type tag.
    #[must_use]
    pub fn with_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Returns the key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the `{{key}}` token that refers to this property.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.key.as_deref().unwrap_or_default())
    }

    /// Returns true when the value must be written as a JSON boolean.
    #[must_use]
    pub fn is_boolean_literal(&self) -> bool {
        self.property_type.as_deref() == Some(BOOLEAN_TYPE)
            && matches!(self.value.as_deref(), Some("true" | "false"))
    }

    pub(crate) fn has_key(&self, key: Option<&str>) -> bool {
        self.key.as_deref() == key
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        fn text(field: Option<&String>) -> &str {
            field.map_or("", String::as_str)
        }
        text(self.key.as_ref()) == text(other.key.as_ref())
            && text(self.value.as_ref()) == text(other.value.as_ref())
            && text(self.description.as_ref()) == text(other.description.as_ref())
            && text(self.property_type.as_ref()) == text(other.property_type.as_ref())
    }
}

impl Eq for Property {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_compare_as_empty() {
        let a = Property::new("k", "");
        let b = Property::with_key("k").with_description("");
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_covers_every_field() {
        let a = Property::new("k", "v");
        assert_ne!(a, Property::new("k", "v").with_type("string"));
        assert_ne!(a, Property::new("k", "v").with_description("d"));
        assert_ne!(a, Property::new("k", "w"));
    }

    #[test]
    fn test_token() {
        assert_eq!(Property::new("baseUrl", "x").token(), "{{baseUrl}}");
    }

    #[test]
    fn test_boolean_literal() {
        assert!(Property::boolean("flag", true).is_boolean_literal());
        assert!(!Property::new("flag", "true").is_boolean_literal());
        assert!(
            !Property::new("flag", "yes")
                .with_type(BOOLEAN_TYPE)
                .is_boolean_literal()
        );
    }
}
