// src/config.rs
use std::time::Duration;

use reqwest::Url;

use crate::error::{Result, WidgetError};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "CHAT_WIDGET_API_URL";

pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";
pub const RECOMMENDATIONS_HEADER: &str = "<strong>📱 Recommended Products:</strong>";

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Origin of the assistant service. Endpoints are resolved against it.
    pub api_url: Url,
    /// Bot message appended when a send fails.
    pub fallback_reply: String,
    pub recommendations_header: String,
    pub badge_glyph: String,
    /// How long the toggle control keeps its attention animation.
    pub attention_duration: Duration,
    /// `chrono` format string used for entry timestamps.
    pub time_format: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid url"),
            fallback_reply: FALLBACK_REPLY.to_string(),
            recommendations_header: RECOMMENDATIONS_HEADER.to_string(),
            badge_glyph: "!".to_string(),
            attention_duration: Duration::from_millis(500),
            time_format: "%H:%M".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            ..Self::default()
        })
    }

    /// Reads the service origin from the environment, loading `.env` first.
    /// Falls back to the default origin when the variable is unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        match std::env::var(API_URL_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::with_api_url(raw.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn session_endpoint(&self) -> Result<Url> {
        self.endpoint("session/new")
    }

    pub fn chat_endpoint(&self) -> Result<Url> {
        self.endpoint("chat")
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| WidgetError::Config(format!("cannot resolve {path}: {e}")))
    }
}

// A trailing slash keeps `Url::join` from dropping the last path segment.
fn parse_api_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|e| WidgetError::Config(format!("invalid api url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(WidgetError::Config(format!("api url {raw:?} cannot be a base")));
    }
    Ok(url)
}
