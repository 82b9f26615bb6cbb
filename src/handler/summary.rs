use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extractor::AppJson,
    request::SummarizeText,
    response::{SummaryMetadata, SummaryResponse},
    summarize::{build_prompt, prepare_input, TOO_SHORT_SUMMARY},
    AppState,
};

pub async fn summarize_handler(
    State(data): State<Arc<AppState>>,
    AppJson(body): AppJson<SummarizeText>,
) -> ApiResult<impl IntoResponse> {
    let text = body
        .text
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No text provided for summarization".into()))?;

    let prepared = prepare_input(text);
    if prepared.is_too_short() {
        return Ok(Json(SummaryResponse {
            summary: TOO_SHORT_SUMMARY.to_owned(),
            metadata: SummaryMetadata {
                original_length: prepared.original_length,
                processed_length: prepared.processed_length(),
                summary_length: TOO_SHORT_SUMMARY.chars().count(),
                truncated: false,
                skipped: true,
                model: None,
                generated_at: Utc::now(),
            },
        }));
    }

    let summary = data.gemini.generate(&build_prompt(&prepared.text)).await?;
    info!(
        original_length = prepared.original_length,
        truncated = prepared.truncated,
        "Generated summary"
    );

    Ok(Json(SummaryResponse {
        metadata: SummaryMetadata {
            original_length: prepared.original_length,
            processed_length: prepared.processed_length(),
            summary_length: summary.chars().count(),
            truncated: prepared.truncated,
            skipped: false,
            model: Some(data.gemini.model().to_owned()),
            generated_at: Utc::now(),
        },
        summary,
    }))
}
