//! The result of a file read: raw bytes, or text rendered in an encoding.

use crate::fs::encoding::Encoding;

/// Content returned by [`FileSystem::read_file`](crate::fs::FileSystem::read_file)
/// and its synchronous counterpart.
///
/// A read without an encoding yields [`FileContent::Raw`]; a read with one
/// yields [`FileContent::Text`] rendered via [`Encoding::encode_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Undecoded bytes.
    Raw(Vec<u8>),
    /// Bytes rendered as text in the requested encoding.
    Text(String),
}

impl FileContent {
    /// Apply an optional encoding to raw bytes, producing the variant a read
    /// with that encoding argument must return.
    pub fn render(bytes: Vec<u8>, encoding: Option<Encoding>) -> Self {
        match encoding {
            Some(encoding) => Self::Text(encoding.encode_text(&bytes)),
            None => Self::Raw(bytes),
        }
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// View the content as bytes (a text variant yields its UTF-8 bytes).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    /// The rendered text, if this is a text variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Consume into bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
        }
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        Self::Raw(bytes.to_vec())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_encoding_is_raw() {
        let content = FileContent::render(b"bytes".to_vec(), None);
        assert_eq!(content, FileContent::Raw(b"bytes".to_vec()));
        assert!(content.as_text().is_none());
    }

    #[test]
    fn test_render_with_encoding_is_text() {
        let content = FileContent::render(b"ab".to_vec(), Some(Encoding::Hex));
        assert_eq!(content.as_text(), Some("6162"));
    }

    #[test]
    fn test_len_counts_bytes() {
        assert_eq!(FileContent::from("héllo").len(), 6);
        assert_eq!(FileContent::from(vec![1, 2, 3]).len(), 3);
    }
}
