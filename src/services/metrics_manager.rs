use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    MessageSent,
    ReplyReceived,
    SendFailed,
    RecommendationsShown,
    ProductDetailsOpened,
    FallbackSession,
}

impl WidgetEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetEvent::MessageSent => "message_sent",
            WidgetEvent::ReplyReceived => "reply_received",
            WidgetEvent::SendFailed => "send_failed",
            WidgetEvent::RecommendationsShown => "recommendations_shown",
            WidgetEvent::ProductDetailsOpened => "product_details_opened",
            WidgetEvent::FallbackSession => "fallback_session",
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub event_usage: HashMap<String, u64>,
}

/// Usage counters for one page view. Owned by the widget controller, so no
/// locking is needed.
#[derive(Debug, Default)]
pub struct MetricsManager {
    inner: MetricsData,
}

impl MetricsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, event: WidgetEvent) {
        *self
            .inner
            .event_usage
            .entry(event.as_str().to_string())
            .or_insert(0) += 1;
    }

    pub fn count(&self, event: WidgetEvent) -> u64 {
        self.inner
            .event_usage
            .get(event.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn get_metrics(&self) -> MetricsData {
        self.inner.clone()
    }
}
