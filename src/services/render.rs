// src/services/render.rs
use serde::Serialize;

use crate::message::Product;

const DETAILS_CLOSING: &str =
    "Would you like more information about this product or see other options?";

/// Compact, selectable summary of one recommended product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub price: String,
    /// Present fields only, joined with " • ". Empty when none are known.
    pub specs: String,
    #[serde(skip)]
    pub product: Product,
}

impl ProductCard {
    pub fn new(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: format_price(product.price),
            specs: specs_line(product),
            product: product.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationBlock {
    /// Markup shown above the cards.
    pub header: String,
    pub cards: Vec<ProductCard>,
}

impl RecommendationBlock {
    pub fn new(header: impl Into<String>, products: &[Product]) -> Self {
        Self {
            header: header.into(),
            cards: products.iter().map(ProductCard::new).collect(),
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn specs_line(product: &Product) -> String {
    let mut parts = Vec::new();
    if let Some(ram) = product.ram_gb {
        parts.push(format!("{ram}GB RAM"));
    }
    if let Some(storage) = product.storage_gb {
        parts.push(format!("{storage}GB Storage"));
    }
    if let Some(weight) = product.weight_kg {
        parts.push(format!("{weight}kg"));
    }
    if let Some(processor) = product.processor.as_deref().filter(|p| !p.is_empty()) {
        parts.push(processor.to_string());
    }
    parts.join(" • ")
}

/// Markup for the expanded view of a selected card. Absent fields are left out.
pub fn product_details(product: &Product) -> String {
    let mut lines = vec![
        format!("<strong>{}</strong>", escape_html(&product.name)),
        format!("💰 Price: {}", format_price(product.price)),
    ];
    if let Some(brand) = product.brand.as_deref() {
        lines.push(format!("🏷️ Brand: {}", escape_html(brand)));
    }
    if let Some(ram) = product.ram_gb {
        lines.push(format!("💾 RAM: {ram}GB"));
    }
    if let Some(storage) = product.storage_gb {
        lines.push(format!("💿 Storage: {storage}GB"));
    }
    if let Some(weight) = product.weight_kg {
        lines.push(format!("⚖️ Weight: {weight}kg"));
    }
    if let Some(screen) = product.screen_size_inches {
        lines.push(format!("🖥️ Screen: {screen}\""));
    }
    if let Some(processor) = product.processor.as_deref() {
        lines.push(format!("🔧 Processor: {}", escape_html(processor)));
    }
    if let Some(graphics) = product.graphics.as_deref() {
        lines.push(format!("🎮 Graphics: {}", escape_html(graphics)));
    }
    if let Some(battery) = product.battery_life_hours {
        lines.push(format!("🔋 Battery: {battery} hours"));
    }
    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(escape_html(description));
    }

    let mut details = lines.join("<br>");
    details.push_str("<br><br>");
    details.push_str(DETAILS_CLOSING);
    details
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
