//! Completion client
//!
//! Wraps the remote chat-completion call behind the [`ChatTransport`] trait
//! seam so the readiness machine and error mapping are testable without a
//! network. The production transport is [`HttpTransport`], which speaks the
//! OpenAI chat-completions wire shape over reqwest.
//!
//! The client guards every completion behind a one-time model availability
//! check: the first successful `complete` confirms the configured model is
//! present in the provider's catalog and the client stays ready for the rest
//! of its life. While the check fails, it is re-issued on every call.
//!
//! No retries and no backoff; one attempt per call. Retrying is left to the
//! caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{CursorweaveError, Result};

/// Maps a non-success HTTP status to a short human description.
pub fn describe_status(status: u16) -> &'static str {
    match status {
        401 => "Unauthorized",
        404 => "Not found",
        429 => "Too many requests",
        500 => "Internal server error",
        503 => "Service unavailable",
        504 => "Gateway timeout",
        522 => "Connection timed out",
        _ => "Unknown error",
    }
}

/// Result of a model catalog listing
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    pub status: u16,
    pub models: Vec<String>,
}

/// Result of one chat completion request
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub status: u16,
    pub content: Option<String>,
}

/// Transport seam for the remote completion provider.
///
/// Implementations report HTTP-level outcomes (status plus body) and leave
/// status-to-error mapping to the [`CompletionClient`]. Transport-level IO
/// failures surface as [`CursorweaveError::Transport`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Lists the model identifiers available to this account.
    async fn list_models(&self) -> Result<ModelCatalog>;

    /// Sends one chat completion request, one user message per prompt.
    async fn chat(&self, model: &str, messages: &[String], temperature: f64) -> Result<ChatReply>;
}

/// Readiness of a completion client.
///
/// One-way: once a client has confirmed its model it never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

impl Readiness {
    /// Transition taken after an availability check.
    ///
    /// Confirming the model moves to `Ready`; a failed check leaves the
    /// state untouched, so `Ready` never reverts.
    pub fn advance(self, model_available: bool) -> Self {
        match (self, model_available) {
            (Self::NotReady, true) => Self::Ready,
            (state, _) => state,
        }
    }

    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Client for the remote completion service
#[derive(Debug)]
pub struct CompletionClient<T: ChatTransport> {
    pub(crate) transport: T,
    model: String,
    default_temperature: f64,
    readiness: Readiness,
}

impl<T: ChatTransport> CompletionClient<T> {
    pub fn new(transport: T, model: impl Into<String>, default_temperature: f64) -> Self {
        Self {
            transport,
            model: model.into(),
            default_temperature,
            readiness: Readiness::default(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Completes the given prompts into a single response string.
    ///
    /// `temperature` falls back to the configured default when `None`.
    /// Single attempt: non-success statuses map to
    /// [`CursorweaveError::RemoteService`] and a success without content maps
    /// to [`CursorweaveError::EmptyResponse`].
    pub async fn complete(&mut self, prompts: &[String], temperature: Option<f64>) -> Result<String> {
        self.ensure_ready().await?;

        let temperature = temperature.unwrap_or(self.default_temperature);
        let reply = self.transport.chat(&self.model, prompts, temperature).await?;

        if !is_success(reply.status) {
            return Err(CursorweaveError::RemoteService {
                status: reply.status,
                description: describe_status(reply.status),
            });
        }

        match reply.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(CursorweaveError::EmptyResponse),
        }
    }

    /// Checks the configured model is available, at most once per instance.
    async fn ensure_ready(&mut self) -> Result<()> {
        if self.readiness.is_ready() {
            return Ok(());
        }

        let catalog = self.transport.list_models().await?;
        if !is_success(catalog.status) {
            return Err(CursorweaveError::RemoteService {
                status: catalog.status,
                description: describe_status(catalog.status),
            });
        }

        let available = catalog.models.iter().any(|id| id == &self.model);
        self.readiness = self.readiness.advance(available);

        if !available {
            return Err(CursorweaveError::ModelUnavailable {
                model: self.model.clone(),
            });
        }

        tracing::debug!(model = %self.model, "model availability confirmed");
        Ok(())
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// HTTP transport speaking the OpenAI chat-completions wire shape
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    organization: String,
    http_client: reqwest::Client,
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

impl HttpTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            organization: config.organization.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the transport at a different API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Organization", &self.organization)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn list_models(&self) -> Result<ModelCatalog> {
        let response = self.request(reqwest::Method::GET, "/models").send().await?;

        let status = response.status().as_u16();
        if !is_success(status) {
            return Ok(ModelCatalog {
                status,
                models: Vec::new(),
            });
        }

        let body: ModelsResponse = response.json().await?;
        Ok(ModelCatalog {
            status,
            models: body.data.into_iter().map(|entry| entry.id).collect(),
        })
    }

    async fn chat(&self, model: &str, messages: &[String], temperature: f64) -> Result<ChatReply> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages
                .iter()
                .map(|content| ChatMessage {
                    role: "user".to_string(),
                    content: content.clone(),
                })
                .collect(),
            temperature,
        };

        let response = self
            .request(reqwest::Method::POST, "/chat/completions")
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !is_success(status) {
            return Ok(ChatReply {
                status,
                content: None,
            });
        }

        let body: ChatCompletionResponse = response.json().await?;
        Ok(ChatReply {
            status,
            content: body.choices.into_iter().next().map(|c| c.message.content),
        })
    }
}
