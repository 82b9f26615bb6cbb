//! Plain-text extraction from uploaded documents.
//!
//! Text files are decoded directly, PDFs go through `pdf-extract`, and the
//! Office Open XML formats (Word, PowerPoint) are read straight out of their
//! zip containers by [`office`].

mod office;

use thiserror::Error;

/// Extracted text shorter than this is treated as "nothing useful found".
pub const MIN_EXTRACTED_CHARS: usize = 5;

pub const SUPPORTED_FORMATS: &str = "TXT, MD, PDF, DOC, DOCX, PPT, PPTX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    Word,
    Slides,
}

impl FileKind {
    /// Resolves the kind from the declared MIME type, falling back to the
    /// file extension when the MIME type is absent or generic.
    pub fn detect(mime: Option<&str>, file_name: &str) -> Option<FileKind> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_file_name(file_name))
    }

    fn from_mime(mime: &str) -> Option<FileKind> {
        let essence = mime.split(';').next().unwrap_or(mime).trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/plain" | "text/markdown" => Some(FileKind::Text),
            "application/pdf" => Some(FileKind::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(FileKind::Word)
            }
            "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(FileKind::Slides)
            }
            _ => None,
        }
    }

    fn from_file_name(file_name: &str) -> Option<FileKind> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "md" => Some(FileKind::Text),
            "pdf" => Some(FileKind::Pdf),
            "doc" | "docx" => Some(FileKind::Word),
            "ppt" | "pptx" => Some(FileKind::Slides),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            FileKind::Text => "text/plain",
            FileKind::Pdf => "application/pdf",
            FileKind::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileKind::Slides => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}. Supported formats: {}", SUPPORTED_FORMATS)]
    Unsupported(String),
    #[error("Could not extract meaningful text from the file. The file may be empty or contain only images.")]
    NoText,
    #[error("Failed to parse PDF. The file may be password-protected, corrupted, or contain only images.")]
    Pdf(String),
    #[error("Failed to parse Word document. The file may be corrupted or in an unsupported format.")]
    Word(String),
    #[error("Failed to parse PowerPoint file. The file may be corrupted or in an unsupported format.")]
    Slides(String),
}

impl ExtractError {
    /// Whether the failure was caused by the upload itself rather than a parser.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExtractError::Unsupported(_) | ExtractError::NoText)
    }

    fn parse_failure(kind: FileKind, detail: String) -> ExtractError {
        match kind {
            FileKind::Pdf => ExtractError::Pdf(detail),
            FileKind::Word => ExtractError::Word(detail),
            // plain text decoding is lossy and never fails
            FileKind::Slides | FileKind::Text => ExtractError::Slides(detail),
        }
    }
}

/// Extracts and normalizes the text of `bytes`, rejecting results shorter
/// than [`MIN_EXTRACTED_CHARS`].
///
/// Parsing runs on the blocking pool; a panicking parser is reported as a
/// parse failure of that format.
pub async fn extract_text(kind: FileKind, bytes: Vec<u8>) -> Result<String, ExtractError> {
    let raw = tokio::task::spawn_blocking(move || extract_raw(kind, &bytes))
        .await
        .map_err(|e| ExtractError::parse_failure(kind, format!("parser aborted: {e}")))??;

    let text = normalize_whitespace(&raw);
    if text.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

fn extract_raw(kind: FileKind, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        FileKind::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string())),
        FileKind::Word => office::word_text(bytes).map_err(|e| ExtractError::Word(e.to_string())),
        FileKind::Slides => {
            office::slides_text(bytes).map_err(|e| ExtractError::Slides(e.to_string()))
        }
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
