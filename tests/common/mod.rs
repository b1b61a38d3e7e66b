#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use storefront_chat_widget::{
    ChatReply, ChatRequest, ChatTransport, ChatWidget, EntryBody, EntryId, Product, Role,
    TranscriptEntry, VisualState, WidgetConfig, WidgetError, WidgetView,
};
use tokio::sync::oneshot;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn reply(text: &str) -> ChatReply {
    ChatReply {
        reply: text.to_string(),
        recommended_products: None,
        session_id: None,
        needs_more_info: false,
    }
}

pub fn reply_with_products(text: &str, products: Vec<Product>) -> ChatReply {
    ChatReply {
        recommended_products: Some(products),
        ..reply(text)
    }
}

pub fn laptop(name: &str, price: f64) -> Product {
    Product {
        name: name.to_string(),
        price,
        ram_gb: Some(16),
        storage_gb: Some(512),
        weight_kg: Some(1.4),
        screen_size_inches: Some(14.0),
        processor: Some("Ryzen 7".to_string()),
        battery_life_hours: Some(10.0),
        description: Some("A solid all-rounder.".to_string()),
        ..Default::default()
    }
}

pub enum Scripted {
    Reply(ChatReply),
    Status(StatusCode),
    Delayed(oneshot::Receiver<ChatReply>),
}

#[derive(Default)]
struct FakeState {
    session: Option<String>,
    session_calls: usize,
    replies: VecDeque<Scripted>,
    requests: Vec<ChatRequest>,
}

/// Scripted stand-in for the assistant service. Clones share state so a
/// test can keep one handle after moving another into the widget.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn with_session(id: &str) -> Self {
        let fake = Self::default();
        fake.inner.lock().unwrap().session = Some(id.to_string());
        fake
    }

    /// A transport whose `/session/new` always fails.
    pub fn without_session() -> Self {
        Self::default()
    }

    pub fn push(&self, scripted: Scripted) {
        self.inner.lock().unwrap().replies.push_back(scripted);
    }

    pub fn push_reply(&self, reply: ChatReply) {
        self.push(Scripted::Reply(reply));
    }

    pub fn push_delayed(&self) -> oneshot::Sender<ChatReply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Delayed(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn session_calls(&self) -> usize {
        self.inner.lock().unwrap().session_calls
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn create_session(&self) -> storefront_chat_widget::Result<String> {
        let mut state = self.inner.lock().unwrap();
        state.session_calls += 1;
        state
            .session
            .clone()
            .ok_or(WidgetError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn send_chat(&self, request: &ChatRequest) -> storefront_chat_widget::Result<ChatReply> {
        let scripted = {
            let mut state = self.inner.lock().unwrap();
            state.requests.push(request.clone());
            state.replies.pop_front()
        };
        match scripted {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Status(status)) => Err(WidgetError::Status(status)),
            Some(Scripted::Delayed(rx)) => rx
                .await
                .map_err(|_| WidgetError::Status(StatusCode::GATEWAY_TIMEOUT)),
            None => Err(WidgetError::Status(StatusCode::NOT_IMPLEMENTED)),
        }
    }
}

/// Records every call the controller makes against the host page.
#[derive(Debug)]
pub struct RecordingView {
    pub panel: VisualState,
    pub toggle_visible: bool,
    pub minimize_label: String,
    pub entries: Vec<TranscriptEntry>,
    pub typing: Option<EntryId>,
    pub typing_shown: usize,
    pub typing_removed: usize,
    pub scrolls: usize,
    pub greeting: Option<String>,
    pub input: String,
    pub focus_count: usize,
    pub send_enabled: bool,
    pub badge: Option<String>,
    pub attention: bool,
    /// Transcript-affecting calls in order: `user:..`, `bot:..`,
    /// `recommendations:N`, `typing+`, `typing-`.
    pub log: Vec<String>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            panel: VisualState::Closed,
            toggle_visible: true,
            minimize_label: "−".to_string(),
            entries: Vec::new(),
            typing: None,
            typing_shown: 0,
            typing_removed: 0,
            scrolls: 0,
            greeting: None,
            input: String::new(),
            focus_count: 0,
            send_enabled: false,
            badge: None,
            attention: false,
            log: Vec::new(),
        }
    }
}

impl RecordingView {
    pub fn last_entry(&self) -> &TranscriptEntry {
        self.entries.last().expect("no entries rendered")
    }
}

impl WidgetView for RecordingView {
    fn set_panel_state(&mut self, state: VisualState) {
        self.panel = state;
    }

    fn set_toggle_visible(&mut self, visible: bool) {
        self.toggle_visible = visible;
    }

    fn set_minimize_label(&mut self, label: &str) {
        self.minimize_label = label.to_string();
    }

    fn append_entry(&mut self, entry: &TranscriptEntry) {
        let line = match (&entry.role, &entry.body) {
            (Role::User, EntryBody::Message { content, .. }) => format!("user:{content}"),
            (Role::Bot, EntryBody::Message { content, .. }) => format!("bot:{content}"),
            (_, EntryBody::Recommendations(block)) => {
                format!("recommendations:{}", block.cards.len())
            }
        };
        self.log.push(line);
        self.entries.push(entry.clone());
    }

    fn show_typing(&mut self, id: EntryId) {
        assert!(self.typing.is_none(), "second typing placeholder shown");
        self.typing = Some(id);
        self.typing_shown += 1;
        self.log.push("typing+".to_string());
    }

    fn remove_typing(&mut self, id: EntryId) {
        assert_eq!(self.typing, Some(id), "removed an unknown placeholder");
        self.typing = None;
        self.typing_removed += 1;
        self.log.push("typing-".to_string());
    }

    fn scroll_to_latest(&mut self) {
        self.scrolls += 1;
    }

    fn stamp_greeting(&mut self, timestamp: &str) {
        self.greeting = Some(timestamp.to_string());
    }

    fn read_input(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn focus_input(&mut self) {
        self.focus_count += 1;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn show_badge(&mut self, glyph: &str) {
        self.badge = Some(glyph.to_string());
    }

    fn hide_badge(&mut self) {
        self.badge = None;
    }

    fn set_attention(&mut self, active: bool) {
        self.attention = active;
    }
}

pub type TestWidget = ChatWidget<RecordingView, FakeTransport>;

/// A started widget whose session has already been applied.
pub async fn ready_widget(transport: FakeTransport) -> TestWidget {
    init_tracing();
    let mut widget = ChatWidget::new(WidgetConfig::default(), RecordingView::default(), transport);
    widget.start();
    assert!(widget.next_completion().await);
    assert!(widget.session().is_some());
    widget
}

/// Types `text` into the input and lets the widget re-check the send gate.
pub fn type_input(widget: &mut TestWidget, text: &str) {
    widget.view_mut().input = text.to_string();
    widget.input_changed();
}
