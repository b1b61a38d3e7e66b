// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Missing and `null` are both treated as "no recommendations".
    #[serde(default)]
    pub recommended_products: Option<Vec<Product>>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub needs_more_info: bool,
}

impl ChatReply {
    pub fn products(&self) -> &[Product] {
        self.recommended_products.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// A product suggested by the assistant. Only `name` and `price` are
/// guaranteed; the rest are presentation fields that may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    #[serde(default, rename = "ram")]
    pub ram_gb: Option<u32>,
    #[serde(default, rename = "storage")]
    pub storage_gb: Option<u32>,
    #[serde(default, rename = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default, rename = "screen_size")]
    pub screen_size_inches: Option<f64>,
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default, rename = "battery_life")]
    pub battery_life_hours: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub graphics: Option<String>,
}
