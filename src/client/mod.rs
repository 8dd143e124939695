//! Client for the GitHub Models inference and catalog endpoints.

mod error;
mod types;

pub use error::ApiError;
pub use types::{ChatRequest, ChatResponse, Choice, Message, ModelInfo, Role};

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1";

const DEFAULT_BASE_URL: &str = "https://models.github.ai";
const API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub Models API client. Holds no mutable state, so a single instance
/// can serve concurrent calls through `&self`.
#[derive(Debug)]
pub struct Client {
    token: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Builds a client from a bearer token. The model falls back to
    /// [`DEFAULT_MODEL`] and the transport to a plain `reqwest::Client`
    /// when not supplied.
    pub fn new(
        token: impl Into<String>,
        model: Option<String>,
        http: Option<reqwest::Client>,
    ) -> Result<Self, ApiError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }

        Ok(Self {
            token,
            model: model
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: http.unwrap_or_default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Creates a single chat completion. An unset or empty model on the
    /// request is replaced by the client's configured model before sending.
    pub async fn create_chat(&self, mut request: ChatRequest) -> Result<ChatResponse, ApiError> {
        if request.model.as_deref().unwrap_or("").is_empty() {
            request.model = Some(self.model.clone());
        }

        let url = format!("{}/inference/chat/completions", self.base_url);
        debug!(
            url = %url,
            model = request.model.as_deref().unwrap_or_default(),
            message_count = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        decode_response(response).await
    }

    /// Lists the model catalog available to this token, in server order.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let url = format!("{}/catalog/models", self.base_url);
        debug!(url = %url, "requesting model catalog");

        // Catalog requests carry no body and no api-version header.
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(&self.token)
            .send()
            .await?;

        decode_response(response).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.as_u16() >= 400 {
        warn!(
            status = status.as_u16(),
            "GitHub Models API returned an error status"
        );
        return Err(status_error(status, body));
    }

    Ok(serde_json::from_str(&body)?)
}
