//! Form body decoding module
//!
//! Decodes `application/x-www-form-urlencoded` request bodies into a
//! key/value map. Decoding is permissive: malformed input never fails the
//! request.

use std::collections::HashMap;

/// Decode a form-urlencoded body into a parameter map.
///
/// Splits on `&`, then each segment on its first `=`. Later duplicate keys
/// overwrite earlier ones. Values are percent-decoded before storage; a
/// segment without `=` maps its key to the empty string, and empty segments
/// are dropped.
///
/// # Examples
/// ```
/// use formlet::http::form::parse;
/// let params = parse(b"message=hello%20world&second=x");
/// assert_eq!(params.get("message").map(String::as_str), Some("hello world"));
/// assert_eq!(params.get("second").map(String::as_str), Some("x"));
/// ```
#[must_use]
pub fn parse(body: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(body);
    let mut params = HashMap::new();

    for segment in text.split('&') {
        if segment.is_empty() {
            continue;
        }
        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key, value),
            None => (segment, ""),
        };
        params.insert(key.to_string(), decode_value(value));
    }

    params
}

/// Percent-decode a single form value.
///
/// A value whose decoded bytes are not valid UTF-8 is kept as its raw
/// undecoded text. `+` is passed through unchanged.
#[must_use]
pub fn decode_value(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}
