//! # Template Renderer
//!
//! Fills `{field}` slots in the templates of [`crate::formats`] from a
//! parameter snapshot. `{{` and `}}` produce literal braces.
//!
//! Values are written as text: strings verbatim, `null` as nothing, and
//! numbers, booleans, arrays, and objects as their JSON text. Escaping is
//! the caller's job; see [`xml_escape`].

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::KmlError;

/// Render `template`, taking each slot's value from `fields`.
///
/// # Errors
///
/// - `KmlError::MissingField` if a slot names a field that is absent.
/// - `KmlError::Template` for an unterminated `{` or an unpaired `}`.
pub fn render(template: &str, fields: &IndexMap<String, Value>) -> Result<String, KmlError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let offset = template.len() - tail.len();

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if tail.starts_with('{') {
            let end = tail.find('}').ok_or_else(|| {
                KmlError::Template(format!("unterminated field at byte {offset}"))
            })?;
            let name = &tail[1..end];
            let value = fields
                .get(name)
                .ok_or_else(|| KmlError::MissingField(name.to_string()))?;
            out.push_str(&value_text(value));
            rest = &tail[end + 1..];
        } else {
            return Err(KmlError::Template(format!("unpaired '}}' at byte {offset}")));
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// The text a value renders as inside a template.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Escape the five XML special characters.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_render_fills_fields() {
        let f = fields(&[("name", json!("Track")), ("width", json!(4))]);
        assert_eq!(
            render("<name>{name}</name><w>{width}</w>", &f).unwrap(),
            "<name>Track</name><w>4</w>"
        );
    }

    #[test]
    fn test_render_repeated_field() {
        let f = fields(&[("x", json!(1.5))]);
        assert_eq!(render("{x},{x}", &f).unwrap(), "1.5,1.5");
    }

    #[test]
    fn test_render_null_is_empty() {
        let f = fields(&[("style_url", Value::Null)]);
        assert_eq!(render("[{style_url}]", &f).unwrap(), "[]");
    }

    #[test]
    fn test_render_escaped_braces() {
        let f = fields(&[("a", json!("v"))]);
        assert_eq!(render("{{{a}}}", &f).unwrap(), "{v}");
    }

    #[test]
    fn test_render_missing_field() {
        let err = render("{absent}", &IndexMap::new()).unwrap_err();
        assert!(matches!(err, KmlError::MissingField(ref name) if name == "absent"));
    }

    #[test]
    fn test_render_unterminated_field() {
        let err = render("abc {name", &fields(&[("name", json!("x"))])).unwrap_err();
        assert!(matches!(err, KmlError::Template(_)));
    }

    #[test]
    fn test_render_stray_closing_brace() {
        let err = render("abc } def", &IndexMap::new()).unwrap_err();
        assert!(matches!(err, KmlError::Template(_)));
    }

    #[test]
    fn test_render_without_fields_is_identity() {
        assert_eq!(render("plain text", &IndexMap::new()).unwrap(), "plain text");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("s")), "s");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(25000.0)), "25000.0");
        assert_eq!(value_text(&Value::Null), "");
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }
}
