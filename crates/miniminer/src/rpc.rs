//! JSON-RPC framing for the getwork protocol.
//!
//! Requests are serialized with serde. Responses are scanned for the fields
//! the miner needs rather than decoded against a schema, so any body that
//! carries a `"data"` string or a `"result"` flag is accepted whatever else
//! surrounds it.

use serde::Serialize;

/// Content type getwork pools expect.
pub const CONTENT_TYPE: &str = "application/json-rpc";

/// A JSON-RPC request with string parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<&'a str>,
}

impl<'a> Request<'a> {
    /// A request with id 0 and at most one parameter.
    pub fn new(method: &'a str, param: Option<&'a str>) -> Self {
        Request {
            id: 0,
            method,
            params: param.into_iter().collect(),
        }
    }

    pub fn to_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The hex digits of the first `"data"` field holding a quoted hex string.
///
/// Only the leading run of hex digits is returned, so trailing junk inside
/// the string is ignored. `"data"` keys with any other value are skipped.
pub fn find_data(body: &str) -> Option<&str> {
    field_values(body, "data").find_map(|value| {
        let digits = value.strip_prefix('"')?;
        let len = digits
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(digits.len());
        (len > 0).then(|| &digits[..len])
    })
}

/// Whether any `"result"` key in a response body has the value `true`.
pub fn find_result(body: &str) -> bool {
    field_values(body, "result").any(|value| value.starts_with("true"))
}

/// Text following each `"<key>"` that is followed by optional whitespace, a
/// `:` and optional whitespace, in order of appearance.
fn field_values<'a>(body: &'a str, key: &str) -> impl Iterator<Item = &'a str> {
    let pattern = format!("\"{key}\"");
    let mut rest = body;
    std::iter::from_fn(move || {
        while let Some(start) = rest.find(&pattern) {
            rest = &rest[start + pattern.len()..];
            if let Some(value) = rest.trim_start().strip_prefix(':') {
                return Some(value.trim_start());
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body() {
        assert_eq!(
            Request::new("getwork", None).to_body().unwrap(),
            r#"{"id":0,"method":"getwork","params":[]}"#
        );
        assert_eq!(
            Request::new("getwork", Some("00ff")).to_body().unwrap(),
            r#"{"id":0,"method":"getwork","params":["00ff"]}"#
        );
    }

    #[test]
    fn test_find_data() {
        let body = r#"{"result": {"midstate": "abcd", "data": "0011aaFF", "target": "ff"}, "error": null, "id": 0}"#;
        assert_eq!(find_data(body), Some("0011aaFF"));
    }

    #[test]
    fn test_find_data_without_structure() {
        assert_eq!(find_data(r#"garbage "data": "00112233 trailing"#), Some("00112233"));
        assert_eq!(find_data(r#""data":"beef""#), Some("beef"));
        assert_eq!(find_data("\"data\"\n:\t\"beef\""), Some("beef"));
    }

    #[test]
    fn test_find_data_skips_non_field_mentions() {
        let body = r#"{"keys": ["data"], "data": "cafe"}"#;
        assert_eq!(find_data(body), Some("cafe"));
    }

    #[test]
    fn test_find_data_skips_fields_without_hex() {
        let body = r#"{"data": null, "result": {"data": "00112233"}}"#;
        assert_eq!(find_data(body), Some("00112233"));

        let body = r#"{"data": "zz", "data": "beef"}"#;
        assert_eq!(find_data(body), Some("beef"));
    }

    #[test]
    fn test_find_data_missing() {
        assert_eq!(find_data(r#"{"result": null, "error": "busy"}"#), None);
        assert_eq!(find_data(r#"{"data": null}"#), None);
        assert_eq!(find_data(r#"{"data": "xyz"}"#), None);
        assert_eq!(find_data(""), None);
    }

    #[test]
    fn test_find_result() {
        assert!(find_result(r#"{"result": true, "error": null, "id": 0}"#));
        assert!(find_result(r#"{"result":true}"#));
        assert!(!find_result(r#"{"result": false, "error": null, "id": 0}"#));
        assert!(!find_result(r#"{"error": "stale"}"#));
        assert!(!find_result(r#"{"result": "true"}"#));
    }

    #[test]
    fn test_find_result_checks_every_field() {
        assert!(find_result(r#"{"error": {"result": false}, "result": true}"#));
        assert!(!find_result(r#"{"error": {"result": false}, "result": null}"#));
    }
}
