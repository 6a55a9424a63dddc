//! Environment documents.
//!
//! An environment file holds a name, an optional parent environment name and
//! a list of `{key, value, enabled}` entries. Disabled entries are dropped on
//! decode.

use satchel_domain::{Environment, Property, PropertyList};

use super::types::{WireEnvValue, WireEnvironment, WireValue};
use super::{CodecError, CodecResult};
use crate::serialization::{from_json, to_json_stable};

/// Decodes an environment document.
///
/// # Errors
///
/// Returns an error if the text is not an environment document.
pub fn parse_environment(json: &str) -> CodecResult<Environment> {
    let wire: WireEnvironment = from_json(json).map_err(super::json_error)?;
    let values = PropertyList::try_from_iter(
        wire.values
            .into_iter()
            .filter(|entry| entry.enabled)
            .map(|entry| {
                let mut property = Property::from_parts(
                    Some(entry.key),
                    Some(entry.value.and_then(WireValue::into_text).unwrap_or_default()),
                );
                property.property_type = entry.kind;
                property
            }),
    )?;
    let environment = Environment::new(wire.name, values);
    Ok(match wire.parent {
        Some(parent) => environment.with_parent(parent),
        None => environment,
    })
}

/// Renders an environment document.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_environment(environment: &Environment) -> CodecResult<String> {
    let wire = WireEnvironment {
        name: environment.name.clone(),
        parent: environment.parent.clone(),
        values: environment
            .values
            .iter()
            .filter_map(|property| {
                Some(WireEnvValue {
                    key: property.key()?.to_owned(),
                    value: property.value().map(|v| WireValue::Text(v.to_owned())),
                    enabled: true,
                    kind: property.property_type.clone(),
                })
            })
            .collect(),
    };
    to_json_stable(&wire).map_err(CodecError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skips_disabled_values() {
        let environment = parse_environment(
            r#"{
                "name": "staging",
                "parent": "base",
                "values": [
                    {"key": "host", "value": "staging.test", "enabled": true},
                    {"key": "port", "value": 8443},
                    {"key": "legacy", "value": "x", "enabled": false}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(environment.name, "staging");
        assert_eq!(environment.parent.as_deref(), Some("base"));
        assert_eq!(environment.values.value_of("port"), Some("8443"));
        assert!(!environment.values.contains_key(Some("legacy")));
    }

    #[test]
    fn test_render_then_parse() {
        let values = PropertyList::try_from_iter([Property::new("token", "abc")]).unwrap();
        let environment = Environment::new("local", values).with_parent("base");

        let rendered = render_environment(&environment).unwrap();
        assert!(rendered.ends_with('\n'));

        let parsed = parse_environment(&rendered).unwrap();
        assert_eq!(parsed.name, "local");
        assert_eq!(parsed.parent.as_deref(), Some("base"));
        assert_eq!(parsed.values.value_of("token"), Some("abc"));
    }
}
