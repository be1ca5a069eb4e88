//! Model listing source: the `ModelSource` seam and its Gemini HTTP implementation.

use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::Config;

/// Upper bound on followed `nextPageToken`s.
const MAX_PAGES: usize = 50;

/// Errors from the listing source. Never propagated past the fetch boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Anything that can list raw model descriptors.
pub trait ModelSource {
    fn list_models(&self) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send;
}

/// One page of `GET /models`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelsPage {
    #[serde(default)]
    models: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Lists models from the Gemini API (`{base_url}/models`), following pagination.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ModelsPage, FetchError> {
        let url = format!("{}/models", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .query(&[("pageSize", self.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_all(&self) -> Result<Vec<Value>, FetchError> {
        let mut models = Vec::new();
        let mut token: Option<String> = None;
        for page_no in 1..=MAX_PAGES {
            let page = self.fetch_page(token.as_deref()).await?;
            log::debug!("Fetched page {} with {} model(s)", page_no, page.models.len());
            models.extend(page.models);
            token = page.next_page_token.filter(|t| !t.is_empty());
            if token.is_none() {
                return Ok(models);
            }
        }
        log::warn!("Stopped listing models after {} pages", MAX_PAGES);
        Ok(models)
    }
}

impl ModelSource for GeminiClient {
    fn list_models(&self) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send {
        self.fetch_all()
    }
}

/// Readable message from an error response. Google error bodies look like
/// `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`.
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        });

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || message.contains("API key not valid")
    {
        format!("{} (check GEMINI_API_KEY)", message)
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            api_error_message(StatusCode::TOO_MANY_REQUESTS, body),
            "Quota exceeded"
        );
    }

    #[test]
    fn auth_errors_get_a_key_hint() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key."}}"#;
        let msg = api_error_message(StatusCode::BAD_REQUEST, body);
        assert!(msg.starts_with("API key not valid"));
        assert!(msg.contains("GEMINI_API_KEY"));

        let msg = api_error_message(StatusCode::FORBIDDEN, "");
        assert_eq!(msg, "Forbidden (check GEMINI_API_KEY)");
    }

    #[test]
    fn non_json_body_is_truncated_text() {
        let body = "x".repeat(500);
        let msg = api_error_message(StatusCode::BAD_GATEWAY, &body);
        assert_eq!(msg.len(), 200);
    }

    #[test]
    fn empty_body_uses_status_reason() {
        assert_eq!(
            api_error_message(StatusCode::SERVICE_UNAVAILABLE, "  "),
            "Service Unavailable"
        );
    }

    #[test]
    fn page_parses_camel_case_token() {
        let page: ModelsPage = serde_json::from_str(
            r#"{"models":[{"name":"models/a"},{"name":"models/b"}],"nextPageToken":"abc"}"#,
        )
        .unwrap();
        assert_eq!(page.models.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let last: ModelsPage = serde_json::from_str("{}").unwrap();
        assert!(last.models.is_empty());
        assert!(last.next_page_token.is_none());
    }

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }
}
