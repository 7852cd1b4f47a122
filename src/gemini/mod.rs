pub mod describe_client;
pub mod prompt_client;
pub mod traits;

use crate::credentials::EffectiveCredential;
use crate::error::{GenerationError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub use describe_client::DescribeClient;
pub use prompt_client::PromptClient;
pub use traits::{DescribeGateway, PromptGateway};

use crate::config::GeminiConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub(crate) const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 90;
const ERROR_BODY_LOG_LIMIT: usize = 2000;

/// Client for the Google Gemini `generateContent` API, exposing one
/// sub-client per capability. Gateways are stateless: each call resolves its
/// own credential and retains no session.
#[derive(Clone)]
pub struct GeminiClient {
    prompt_client: PromptClient,
    describe_client: DescribeClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| GenerationError::UnknownError(e.to_string()))?;

        Ok(Self {
            prompt_client: PromptClient::new(http.clone(), config.clone()),
            describe_client: DescribeClient::new(http, config),
        })
    }

    pub fn prompt(&self) -> &PromptClient {
        &self.prompt_client
    }

    pub fn describe(&self) -> &DescribeClient {
        &self.describe_client
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

impl GeminiResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .filter_map(|content| content.parts.as_deref())
            .flatten()
            .filter_map(|part| part.text.as_deref())
            .find(|text| !text.trim().is_empty())
    }
}

/// Issues one `generateContent` call and normalizes every failure into the
/// `GenerationError` taxonomy. The credential travels only in the
/// `x-goog-api-key` header and is redacted from anything that gets logged.
pub(crate) async fn invoke_model(
    http: &reqwest::Client,
    model: &str,
    credential: &EffectiveCredential,
    payload: &Value,
) -> Result<GeminiResponse> {
    let request_id = uuid::Uuid::new_v4();
    let url = format!("{}/{}:generateContent", GEMINI_API_BASE, model);

    log::info!("Invoking model: {} [req:{}]", model, request_id);

    let response = http
        .post(&url)
        .header("x-goog-api-key", credential.secret())
        .json(payload)
        .send()
        .await
        .map_err(|e| {
            let detail = redact(&e.to_string(), credential.secret());
            log::error!("Gemini request failed to send: {} [req:{}]", detail, request_id);
            GenerationError::UnknownError(detail)
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = normalize_status(status, &body);
        log::error!(
            "Gemini API error: status={}, body={} [req:{}]",
            status,
            redact(&truncate(&body, ERROR_BODY_LOG_LIMIT), credential.secret()),
            request_id
        );
        return Err(error);
    }

    response.json::<GeminiResponse>().await.map_err(|e| {
        let detail = redact(&e.to_string(), credential.secret());
        log::error!("Gemini response was unreadable: {} [req:{}]", detail, request_id);
        GenerationError::UnknownError(detail)
    })
}

/// Parses the schema-constrained JSON object out of the first text candidate.
pub(crate) fn structured_output<T: serde::de::DeserializeOwned>(
    response: &GeminiResponse,
) -> Result<T> {
    let text = response.first_text().ok_or_else(|| {
        GenerationError::UpstreamError("response contained no text candidates".to_string())
    })?;

    serde_json::from_str(text).map_err(|e| {
        GenerationError::UpstreamError(format!(
            "response did not match the expected schema: {} (got: {})",
            e,
            truncate(text, 200)
        ))
    })
}

/// Maps a non-success HTTP response to the error taxonomy. Auth rejections
/// become `InvalidCredential` (the provider signals an invalid key either
/// with 401/403 or with a 400 whose message mentions the API key), 429
/// becomes `RateLimited`, and anything else keeps the provider's message as
/// an `UpstreamError`.
fn normalize_status(status: StatusCode, body: &str) -> GenerationError {
    let message = extract_error_message(body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return GenerationError::RateLimited;
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return GenerationError::InvalidCredential;
    }
    if status == StatusCode::BAD_REQUEST {
        let lowered = message.as_deref().unwrap_or(body).to_ascii_lowercase();
        if lowered.contains("api key not valid") || lowered.contains("api key expired") {
            return GenerationError::InvalidCredential;
        }
    }

    GenerationError::UpstreamError(
        message.unwrap_or_else(|| truncate(body.trim(), ERROR_BODY_LOG_LIMIT)),
    )
}

/// Pulls `error.message` out of a Google API error body, if present.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{}... (truncated)", truncated)
}

fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "[redacted]")
}
