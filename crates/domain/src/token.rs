//! `{{name}}` token scanning and single-pass substitution.

use std::collections::HashMap;

use crate::error::{DomainError, DomainResult};

/// Returns the distinct names of well-formed tokens in `text`, in order of
/// first appearance.
///
/// A token is `{{name}}` where `name` is non-empty and contains no braces,
/// not preceded by `{` and not followed by `}`.
#[must_use]
pub fn token_names(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut names: Vec<&str> = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find("{{") {
        let start = cursor + offset;
        let name_start = start + 2;
        let name_end = text[name_start..]
            .find(['{', '}'])
            .map_or(text.len(), |len| name_start + len);

        let closed = text[name_end..].starts_with("}}");
        let preceded = start > 0 && bytes[start - 1] == b'{';
        let followed = bytes.get(name_end + 2) == Some(&b'}');

        if name_end > name_start && closed && !preceded && !followed {
            let name = &text[name_start..name_end];
            if !names.contains(&name) {
                names.push(name);
            }
            cursor = name_end + 2;
        } else {
            cursor = start + 1;
        }
    }
    names
}

/// Replaces every `{{name}}` token in `text` using `lookup`.
///
/// All names are looked up first; then each literal occurrence of a resolved
/// token is replaced in one left-to-right pass, so substituted values are
/// never scanned again.
///
/// # Errors
///
/// Returns [`DomainError::VariableResolution`] naming the first token that
/// `lookup` cannot resolve.
pub fn resolve_tokens<'v, F>(text: &str, lookup: F) -> DomainResult<String>
where
    F: Fn(&str) -> Option<&'v str>,
{
    let names = token_names(text);
    if names.is_empty() {
        return Ok(text.to_owned());
    }

    let mut values: HashMap<&str, &str> = HashMap::with_capacity(names.len());
    for name in names {
        let value = lookup(name).ok_or_else(|| DomainError::VariableResolution(name.to_owned()))?;
        values.insert(name, value);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let hit = after
            .find("}}")
            .and_then(|end| values.get(&after[..end]).map(|value| (*value, end)));
        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(name: &str) -> Option<&'static str> {
        match name {
            "base" => Some("https://api.com"),
            "id" => Some("42"),
            "loop" => Some("{{id}}"),
            _ => None,
        }
    }

    #[test]
    fn test_token_names() {
        assert_eq!(token_names("{{a}}/{{b}}/{{a}}"), vec!["a", "b"]);
        assert_eq!(token_names("{{{a}}}"), Vec::<&str>::new());
        assert_eq!(token_names("{{}} {{ok}"), Vec::<&str>::new());
        assert_eq!(token_names("{{with space}}"), vec!["with space"]);
    }

    #[test]
    fn test_resolve_all_occurrences() {
        let out = resolve_tokens("{{base}}/users/{{id}}?again={{id}}", vars).unwrap();
        assert_eq!(out, "https://api.com/users/42?again=42");
    }

    #[test]
    fn test_resolve_missing_fails() {
        assert_eq!(
            resolve_tokens("{{base}}/{{nope}}", vars),
            Err(DomainError::VariableResolution("nope".into()))
        );
    }

    #[test]
    fn test_resolution_is_single_pass() {
        assert_eq!(resolve_tokens("x={{loop}}", vars).unwrap(), "x={{id}}");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(resolve_tokens("no tokens {here}", vars).unwrap(), "no tokens {here}");
    }

    #[test]
    fn test_unicode_around_tokens() {
        assert_eq!(resolve_tokens("é{{id}}ü", vars).unwrap(), "é42ü");
    }
}
