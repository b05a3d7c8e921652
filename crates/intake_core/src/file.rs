use std::sync::Arc;

/// Media type accepted for PDF documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const IMAGE_MEDIA_PREFIX: &str = "image/";

/// A file proposed by the user via selection or drop, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The single validated file currently staged for submission.
///
/// Bytes live behind an `Arc` so submit effects can capture the file at
/// submit time without copying the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl StagedFile {
    pub(crate) fn from_candidate(candidate: CandidateFile) -> Self {
        Self {
            name: candidate.name,
            media_type: candidate.media_type,
            bytes: candidate.bytes.into(),
        }
    }

    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Acceptance predicate: any image family media type, or exactly PDF.
///
/// Rejection is silent by contract; callers simply do not stage the file.
pub fn is_supported_media_type(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_PREFIX) || media_type == PDF_MEDIA_TYPE
}
