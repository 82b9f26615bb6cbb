use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{extract_text, word_count, ExtractError, FileKind},
    response::{FileMetadata, ParsedFileResponse},
};

const FILE_FIELD: &str = "file";

struct Upload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> ApiResult<Option<Upload>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?.to_vec();
        return Ok(Some(Upload {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

pub async fn parse_file_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;

    let kind = FileKind::detect(upload.content_type.as_deref(), &upload.file_name)
        .ok_or_else(|| ExtractError::Unsupported(upload.file_name.clone()))?;

    let file_size = upload.bytes.len();
    let text = extract_text(kind, upload.bytes).await?;

    let metadata = FileMetadata {
        file_type: upload
            .content_type
            .unwrap_or_else(|| kind.mime().to_owned()),
        file_name: upload.file_name,
        file_size,
        text_length: text.chars().count(),
        word_count: word_count(&text),
    };
    info!(
        file_name = %metadata.file_name,
        file_size,
        words = metadata.word_count,
        "Extracted text from upload"
    );

    Ok(Json(ParsedFileResponse {
        success: true,
        text,
        metadata,
    }))
}
