use crate::types::Attachment;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/get";

// ============================================
// Error Types
// ============================================

#[derive(Debug, Clone)]
pub struct ChatError(String);

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::new(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Backend Seam
// ============================================

/// One exchange with the chat endpoint. No retry, no cancellation; overlapping
/// calls are independent and complete in arrival order.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn exchange(&self, text: &str, attachment: Option<&Attachment>) -> ChatResult<String>;
}

/// HTTP backend posting the multipart form to the configured endpoint.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint from `NIGHTJAR_ENDPOINT`, falling back to the local default.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("NIGHTJAR_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn exchange(&self, text: &str, attachment: Option<&Attachment>) -> ChatResult<String> {
        let mut form = Form::new().text("msg", text.to_string());
        if let Some(file) = attachment {
            form = form.part(
                "file",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ChatError::new(format!("chat endpoint error {status}: {body}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_the_default_endpoint() {
        // NIGHTJAR_ENDPOINT is not set under cargo test.
        if std::env::var("NIGHTJAR_ENDPOINT").is_err() {
            assert_eq!(HttpBackend::from_env().endpoint(), DEFAULT_ENDPOINT);
        }
    }

    #[test]
    fn chat_error_displays_its_message() {
        let err = ChatError::new("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
