//! Form rendering of JSON values, escaped like Node's `querystring`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const QUERYSTRING_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode the members of a JSON object as form pairs.
///
/// Arrays repeat the key once per element. Anything that is not a string,
/// number or boolean is sent as an empty value. Non-object values encode to
/// the empty string.
pub fn url_encode(value: &Value) -> String {
    let mut pairs = Vec::new();

    if let Value::Object(members) = value {
        for (key, member) in members {
            match member {
                Value::Array(items) => {
                    for item in items {
                        pairs.push(encode_pair(key, item));
                    }
                }
                other => pairs.push(encode_pair(key, other)),
            }
        }
    }

    pairs.join("&")
}

fn encode_pair(key: &str, value: &Value) -> String {
    format!(
        "{}={}",
        utf8_percent_encode(key, QUERYSTRING_ENCODE_SET),
        utf8_percent_encode(&scalar_text(value), QUERYSTRING_ENCODE_SET)
    )
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Whole floats print without a fraction (`1.0` -> `1`).
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_flat_object() {
        assert_eq!(url_encode(&json!({"a": 1})), "a=1");
        assert_eq!(url_encode(&json!({"name": "bob", "admin": false})), "name=bob&admin=false");
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(url_encode(&json!({"q": "a&b=c d"})), "q=a%26b%3Dc%20d");
    }

    #[test]
    fn leaves_querystring_unreserved_marks_alone() {
        assert_eq!(url_encode(&json!({"q": "a b", "t": "it's (ok)~"})), "q=a%20b&t=it's%20(ok)~");
        assert_eq!(url_encode(&json!({"m": "-_.!*"})), "m=-_.!*");
    }

    #[test]
    fn escapes_non_ascii_as_utf8() {
        assert_eq!(url_encode(&json!({"café": "ñ"})), "caf%C3%A9=%C3%B1");
    }

    #[test]
    fn whole_floats_drop_the_fraction() {
        assert_eq!(url_encode(&json!({"a": 1.0, "b": 2.5, "c": -3})), "a=1&b=2.5&c=-3");
    }

    #[test]
    fn arrays_repeat_the_key() {
        assert_eq!(url_encode(&json!({"id": [1, 2, 3]})), "id=1&id=2&id=3");
    }

    #[test]
    fn null_and_nested_objects_become_empty_values() {
        assert_eq!(url_encode(&json!({"a": null, "b": {"c": 1}})), "a=&b=");
    }

    #[test]
    fn non_objects_encode_to_nothing() {
        assert_eq!(url_encode(&json!(42)), "");
        assert_eq!(url_encode(&json!("text")), "");
        assert_eq!(url_encode(&json!([1, 2])), "");
    }
}
