// src/services/transport.rs
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    config::WidgetConfig,
    error::{Result, WidgetError},
    message::{ChatReply, ChatRequest, NewSessionResponse},
};

/// The two calls the widget makes against the assistant service.
#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Asks the service for a new conversation id.
    async fn create_session(&self) -> Result<String>;

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    session_url: Url,
    chat_url: Url,
}

impl HttpTransport {
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &WidgetConfig) -> Result<Self> {
        Ok(Self {
            client,
            session_url: config.session_endpoint()?,
            chat_url: config.chat_endpoint()?,
        })
    }

    // Non-2xx is an error regardless of body; the body is decoded with
    // serde_json so a bad payload surfaces as `Decode`, not as a transport error.
    async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn create_session(&self) -> Result<String> {
        debug!(url = %self.session_url, "requesting new session");
        let response = self.client.post(self.session_url.clone()).send().await?;
        let body: NewSessionResponse = Self::read_json(response).await?;
        Ok(body.session_id)
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
