//! Client for the hosted generative-language `generateContent` endpoint.
//!
//! Every call is one-shot: no retries, no streaming.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const TEMPERATURE: f32 = 0.3;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_CATEGORIES: [&str; 2] = ["HARM_CATEGORY_HARASSMENT", "HARM_CATEGORY_HATE_SPEECH"];

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("AI summarization is not configured")]
    NotConfigured,
    #[error("Invalid request to AI service. The text may contain unsupported content.")]
    BadRequest,
    #[error("Rate limit exceeded. Please try again in a few moments.")]
    RateLimited,
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Failed to generate summary. Please try again.")]
    EmptyResponse,
    #[error("Failed to reach AI service: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: config.gemini_api_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends `prompt` and returns the first candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let api_key = self.api_key.as_deref().ok_or(SummarizeError::NotConfigured)?;

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        };

        debug!(model = %self.model, prompt_bytes = prompt.len(), "Requesting summary");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "AI service returned an error");
            return Err(classify_failure(status, &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).unwrap_or_default();
        first_candidate_text(parsed).ok_or(SummarizeError::EmptyResponse)
    }
}

fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Maps a non-2xx upstream response onto the error surfaced to callers.
pub fn classify_failure(status: StatusCode, body: &str) -> SummarizeError {
    match status {
        StatusCode::BAD_REQUEST => SummarizeError::BadRequest,
        StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ErrorEnvelope>(body)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("AI service returned status {}", status.as_u16()));
            SummarizeError::Upstream {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, api_key: Option<&str>) -> GeminiClient {
        GeminiClient {
            http: Client::new(),
            base_url: base_url.to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    #[test]
    fn classifies_bad_request_and_rate_limit() {
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "{}"),
            SummarizeError::BadRequest
        ));
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, ""),
            SummarizeError::RateLimited
        ));
    }

    #[test]
    fn surfaces_upstream_message() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        match classify_failure(StatusCode::FORBIDDEN, body) {
            SummarizeError::Upstream { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_status_message() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "AI service returned status 502");
    }

    #[test]
    fn joins_candidate_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Key "},{"text":"points."}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_candidate_text(response).as_deref(), Some("Key points."));
    }

    #[test]
    fn blocked_candidate_has_no_text() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(first_candidate_text(response).is_none());
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let err = client("http://127.0.0.1:9", None).generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::NotConfigured));
    }

    #[tokio::test]
    async fn sends_fixed_generation_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "prompt"}]}],
                "generationConfig": {"topK": 40, "maxOutputTokens": 1024},
                "safetySettings": [
                    {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                    {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"A summary."}]}}]}"#)
            .create_async()
            .await;

        let summary = client(&server.url(), Some("test-key"))
            .generate("prompt")
            .await
            .unwrap();
        assert_eq!(summary, "A summary.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_without_candidates_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = client(&server.url(), Some("k")).generate("prompt").await.unwrap_err();
        assert!(matches!(err, SummarizeError::EmptyResponse));
    }
}
