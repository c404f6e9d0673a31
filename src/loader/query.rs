//! Loader query parsing.
//!
//! The host bundler hands the loader its query as an opaque string. Two
//! forms are accepted: `?key=value&...` pairs with percent-encoded values,
//! and a JSON object (`?{"src": ..., "file": ...}`).

use serde::Deserialize;
use thiserror::Error;

/// Parameters carried by the loader query.
///
/// All fields are optional at parse time; [`load`](crate::loader::load)
/// enforces which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoaderQuery {
    /// Encoded file content.
    pub src: Option<String>,
    /// Target path, possibly relative to the importing module.
    pub file: Option<String>,
    /// Name of the encoding `src` is written in. Defaults to hex downstream.
    pub encoding: Option<String>,
}

impl LoaderQuery {
    /// Parse a raw query string, with or without its leading `?`.
    ///
    /// Unknown keys are ignored — they belong to the host, not this loader.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.starts_with('{') {
            return Ok(serde_json::from_str(query)?);
        }

        let mut parsed = Self::default();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, percent_decode(value)?),
                None => (pair, String::new()),
            };
            match key {
                "src" => parsed.src = Some(value),
                "file" => parsed.file = Some(value),
                "encoding" => parsed.encoding = Some(value),
                _ => {}
            }
        }
        Ok(parsed)
    }
}

/// Error raised for a query string the loader cannot interpret.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The JSON object form failed to deserialize.
    #[error("malformed JSON query: {0}")]
    Json(#[from] serde_json::Error),

    /// A `%`-escape in a query value is truncated, non-hex, or decodes to
    /// invalid UTF-8.
    #[error("malformed percent-encoding in query value: '{0}'")]
    PercentEncoding(String),
}

/// Decode `%XX` escapes in a query value.
fn percent_decode(value: &str) -> Result<String, QueryError> {
    if !value.contains('%') {
        return Ok(value.to_string());
    }

    let malformed = || QueryError::PercentEncoding(value.to_string());
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|&b| (b as char).to_digit(16));
            let lo = bytes.get(i + 2).and_then(|&b| (b as char).to_digit(16));
            match (hi, lo) {
                (Some(hi), Some(lo)) => decoded.push((hi * 16 + lo) as u8),
                _ => return Err(malformed()),
            }
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_form() {
        let query = LoaderQuery::parse("?src=cafe&file=./gen.js&encoding=hex").unwrap();
        assert_eq!(query.src.as_deref(), Some("cafe"));
        assert_eq!(query.file.as_deref(), Some("./gen.js"));
        assert_eq!(query.encoding.as_deref(), Some("hex"));
    }

    #[test]
    fn test_pair_form_without_question_mark() {
        let query = LoaderQuery::parse("src=00&file=a.js").unwrap();
        assert_eq!(query.src.as_deref(), Some("00"));
        assert!(query.encoding.is_none());
    }

    #[test]
    fn test_percent_decoding() {
        let query = LoaderQuery::parse("?file=.%2Fsub%2Fgen.js&src=ff").unwrap();
        assert_eq!(query.file.as_deref(), Some("./sub/gen.js"));
    }

    #[test]
    fn test_percent_decoding_rejects_truncated_escape() {
        assert!(LoaderQuery::parse("?file=bad%2").is_err());
        assert!(LoaderQuery::parse("?file=bad%zz").is_err());
    }

    #[test]
    fn test_json_form() {
        let query =
            LoaderQuery::parse(r#"?{"src":"cafe","file":"./gen.js","encoding":"hex"}"#).unwrap();
        assert_eq!(query.src.as_deref(), Some("cafe"));
        assert_eq!(query.file.as_deref(), Some("./gen.js"));
        assert_eq!(query.encoding.as_deref(), Some("hex"));
    }

    #[test]
    fn test_json_form_matches_pair_form() {
        let pairs = LoaderQuery::parse("?src=00ff&file=x.js").unwrap();
        let json = LoaderQuery::parse(r#"{"src":"00ff","file":"x.js"}"#).unwrap();
        assert_eq!(pairs, json);
    }

    #[test]
    fn test_malformed_json() {
        assert!(LoaderQuery::parse(r#"?{"src": }"#).is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let query = LoaderQuery::parse("?src=00&file=a.js&minify=1").unwrap();
        assert_eq!(query.src.as_deref(), Some("00"));
    }

    #[test]
    fn test_missing_params_stay_none() {
        let query = LoaderQuery::parse("?file=a.js").unwrap();
        assert!(query.src.is_none());
        assert!(query.encoding.is_none());
    }
}
