//! The `key=value&key=value` grammar shared by every level file.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParseError;

/// Decoded key/value pairs of one level string.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: HashMap<String, String>,
}

impl QueryParams {
    /// Split a raw level string into its parameters.
    ///
    /// Surrounding whitespace and quotes are dropped, as is a leading `?` or
    /// `#` left over from a copied URL. Keys without `=` get an empty value,
    /// and a repeated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let cleaned = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'')
            .trim_start_matches(|c: char| c == '?' || c == '#');

        let mut pairs = HashMap::new();
        for pair in cleaned.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            pairs.insert(decode_component(key), decode_component(value));
        }
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    /// A field that must be present and non-empty.
    pub fn require(&self, key: &'static str) -> Result<&str, ParseError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ParseError::MissingField(key)),
        }
    }

    /// A required numeric field.
    pub fn require_number<T: FromStr>(&self, key: &'static str) -> Result<T, ParseError> {
        let raw = self.require(key)?;
        parse_number(key, raw)
    }

    /// A numeric field that may be absent or blank.
    pub fn optional_number<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ParseError> {
        match self.get(key) {
            None | Some("") => Ok(None),
            Some(raw) => parse_number(key, raw).map(Some),
        }
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ParseError> {
    raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Form-url decoding: `+` is a space and `%XX` is a raw byte. Malformed
/// escapes are kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let mut byte = [0u8; 1];
                if hex::decode_to_slice(&bytes[i + 1..i + 3], &mut byte).is_ok() {
                    out.push(byte[0]);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encode a value for a level string. Only the characters that would break
/// the grammar are escaped.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' | '=' | '%' | '+' | '#' => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    out.push('%');
                    out.push_str(&hex::encode_upper([byte]));
                }
            }
            ' ' => out.push('+'),
            _ => out.push(ch),
        }
    }
    out
}
