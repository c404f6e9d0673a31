//! Payload encodings for virtual file content.
//!
//! Two directions, matching the two places an encoding name shows up:
//!
//! - **Rendering** stored bytes as text when a read requests an encoding
//!   ([`Encoding::encode_text`]). Never fails — invalid UTF-8 is replaced,
//!   not rejected.
//! - **Parsing** the loader's `src` payload into bytes
//!   ([`Encoding::decode_text`]). Hex and base64 reject malformed input.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

/// The finite set of encoding names the loader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 text. Rendering is lossy (replacement character on invalid
    /// sequences); parsing takes the text's bytes verbatim.
    Utf8,
    /// Lowercase hexadecimal. The loader's default `src` encoding.
    Hex,
    /// Standard base64 with padding.
    Base64,
    /// One byte per character, `U+0000`–`U+00FF`. Characters above `U+00FF`
    /// are truncated to their low byte when parsing.
    Latin1,
}

impl Encoding {
    /// The canonical name of this encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Latin1 => "latin1",
        }
    }

    /// Render bytes as text in this encoding.
    pub fn encode_text(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Hex => hex::encode(bytes),
            Self::Base64 => BASE64.encode(bytes),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Parse text in this encoding into bytes.
    pub fn decode_text(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => Ok(hex::decode(text)?),
            Self::Base64 => Ok(BASE64.decode(text)?),
            Self::Latin1 => Ok(text.chars().map(|c| c as u8).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "latin1" | "binary" => Ok(Self::Latin1),
            other => Err(EncodingError::UnknownName(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for encoding name resolution and payload parsing.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The encoding name is not one of the accepted set.
    #[error("unknown encoding: '{0}'")]
    UnknownName(String),

    /// The payload is not valid hexadecimal.
    #[error("malformed hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The payload is not valid base64.
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
