//! Prompt payload types - what gets sent to the generation capability

use serde::{Deserialize, Serialize};

/// Opaque reference to the video under analysis
///
/// The domain never interprets media content; the binary (when present) is
/// forwarded to the generation capability untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub file_name: String,
    pub media: Option<InlineMedia>,
}

impl VideoRef {
    /// Reference by name only, without an inline binary.
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            media: None,
        }
    }

    /// Reference carrying the media binary for model analysis.
    pub fn with_media(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media: Some(InlineMedia {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }

    /// A run precondition: the reference must actually point at something.
    pub fn is_present(&self) -> bool {
        !self.file_name.is_empty()
    }
}

/// Inline binary media part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineMedia {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Composed request payload: instruction text plus an optional media part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub text: String,
    pub media: Option<InlineMedia>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_ref_has_no_media() {
        let video = VideoRef::named("stream.mp4");
        assert!(video.is_present());
        assert!(video.media.is_none());
    }

    #[test]
    fn test_empty_name_is_absent() {
        assert!(!VideoRef::named("").is_present());
    }

    #[test]
    fn test_media_ref() {
        let video = VideoRef::with_media("clip.webm", "video/webm", vec![1, 2, 3]);
        let media = video.media.unwrap();
        assert_eq!(media.mime_type, "video/webm");
        assert_eq!(media.data, vec![1, 2, 3]);
    }
}
