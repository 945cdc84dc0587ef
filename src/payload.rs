// Conversion result payload
//
// The conversion service returns either an already-serialized text blob or a
// structured JSON value. Everything downstream (the reveal animation, the
// save path, clipboard copy) works on one canonical text form: structured
// values are pretty-printed with 2-space indentation and stable key order
// (serde_json's Value keeps object keys in a sorted map), strings pass
// through unchanged.

use anyhow::{Context, Result};
use serde_json::Value;

/// A conversion result. Immutable once set; replaced wholesale per upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    /// Server sent plain text; displayed and saved as-is
    Text(String),
    /// Server sent structured JSON; canonicalized before display or save
    Structured(Value),
}

impl ResultPayload {
    /// The canonical text form shared by the preview and the saved file.
    ///
    /// Serialization of a structured value can fail in principle; the caller
    /// maps that failure to a dedicated render-error state rather than
    /// letting it reach an animator.
    pub fn canonical_text(&self) -> Result<String> {
        match self {
            ResultPayload::Text(s) => Ok(s.clone()),
            ResultPayload::Structured(value) => {
                serde_json::to_string_pretty(value).context("serializing conversion result")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_pretty_prints_with_two_space_indent() {
        let payload = ResultPayload::Structured(json!({"a": 1, "b": [1, 2]}));
        let text = payload.canonical_text().unwrap();
        assert_eq!(text, "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_key_order_is_stable() {
        // Value's object map is ordered, so key order does not depend on
        // the order fields arrived in
        let a: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let ta = ResultPayload::Structured(a).canonical_text().unwrap();
        let tb = ResultPayload::Structured(b).canonical_text().unwrap();
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_text_passes_through_unchanged() {
        let raw = "already: serialized\n  text";
        let payload = ResultPayload::Text(raw.to_string());
        assert_eq!(payload.canonical_text().unwrap(), raw);
    }

    #[test]
    fn test_scalar_values_serialize() {
        let payload = ResultPayload::Structured(json!(42));
        assert_eq!(payload.canonical_text().unwrap(), "42");
    }
}
