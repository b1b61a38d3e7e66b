// src/widget.rs
use std::{collections::HashMap, future::Future, sync::Arc};

use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

use crate::{
    config::WidgetConfig,
    error::Result,
    message::{ChatReply, Product},
    services::{
        exchange::{self, Completion},
        metrics_manager::{MetricsData, MetricsManager, WidgetEvent},
        notifier::Notifier,
        render::{self, RecommendationBlock},
        session_manager::{self, Session, SessionManager, SessionSource},
        transcript::{EntryId, Role, Transcript},
        transport::ChatTransport,
    },
    state::{self, VisualState, WidgetState},
    view::WidgetView,
};

const MINIMIZE_LABEL: &str = "−";
const RESTORE_LABEL: &str = "+";

/// What a spawned task was doing, so a task that dies without a
/// [`Completion`] can still be resolved.
#[derive(Debug, Clone, Copy)]
enum TaskKind {
    Session,
    Reply,
    Attention { generation: u64 },
}

/// The widget controller.
///
/// All mutation happens through `&mut self` on the host's thread. Network
/// calls and the attention timer run as spawned tasks and are applied when
/// the host awaits [`ChatWidget::next_completion`]; the controller keeps
/// accepting input while they are pending. Methods that spawn work must be
/// called from inside a tokio runtime. Dropping the widget aborts all
/// outstanding tasks.
///
/// A task that panics is resolved like a failed one: a lost send gets the
/// fallback reply and a lost session request gets a local id.
pub struct ChatWidget<V, T>
where
    V: WidgetView,
    T: ChatTransport,
{
    config: WidgetConfig,
    view: V,
    transport: Arc<T>,
    sessions: SessionManager,
    state: WidgetState,
    transcript: Transcript,
    notifier: Notifier,
    metrics: MetricsManager,
    tasks: JoinSet<Completion>,
    task_kinds: HashMap<Id, TaskKind>,
    pending_sends: usize,
    started: bool,
}

impl<V, T> ChatWidget<V, T>
where
    V: WidgetView,
    T: ChatTransport,
{
    pub fn new(config: WidgetConfig, view: V, transport: T) -> Self {
        let transcript = Transcript::new(config.time_format.clone());
        let notifier = Notifier::new(config.badge_glyph.clone(), config.attention_duration);
        Self {
            config,
            view,
            transport: Arc::new(transport),
            sessions: SessionManager::new(),
            state: WidgetState::default(),
            transcript,
            notifier,
            metrics: MetricsManager::new(),
            tasks: JoinSet::new(),
            task_kinds: HashMap::new(),
            pending_sends: 0,
            started: false,
        }
    }

    /// Stamps the greeting and starts session acquisition. Only the first
    /// call has any effect.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let now = self.transcript.timestamp();
        self.view.stamp_greeting(&now);
        self.view.set_panel_state(self.state.visual());
        self.view.set_send_enabled(false);

        let transport = Arc::clone(&self.transport);
        self.spawn_task(TaskKind::Session, async move {
            let (session, source) = session_manager::acquire_session(transport.as_ref()).await;
            Completion::Session { session, source }
        });
    }

    fn spawn_task<F>(&mut self, kind: TaskKind, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let id = self.tasks.spawn(task).id();
        self.task_kinds.insert(id, kind);
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn metrics(&self) -> MetricsData {
        self.metrics.get_metrics()
    }

    pub fn metrics_count(&self, event: WidgetEvent) -> u64 {
        self.metrics.count(event)
    }

    /// Number of spawned tasks that have not been applied yet.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    // ---- widget state machine ----

    pub fn toggle_open(&mut self) -> VisualState {
        let visual = self.state.toggle_open();
        self.view.set_panel_state(visual);
        match visual {
            VisualState::Open => {
                self.notifier.clear_badge();
                self.view.set_toggle_visible(false);
                self.view.hide_badge();
                self.view.focus_input();
            }
            VisualState::Closed => {
                self.view.set_toggle_visible(true);
                self.view.set_minimize_label(MINIMIZE_LABEL);
            }
            VisualState::OpenMinimized => {}
        }
        debug!(state = ?visual, "toggled open");
        visual
    }

    /// Header clicks and the minimize control both land here.
    pub fn toggle_minimize(&mut self) -> VisualState {
        if !self.state.visual().is_visible() {
            return self.state.visual();
        }
        let visual = self.state.toggle_minimize();
        self.view.set_panel_state(visual);
        match visual {
            VisualState::OpenMinimized => self.view.set_minimize_label(RESTORE_LABEL),
            _ => {
                self.view.set_minimize_label(MINIMIZE_LABEL);
                self.view.focus_input();
            }
        }
        visual
    }

    /// Re-evaluates the send gate against the current input.
    pub fn input_changed(&mut self) {
        let enabled = state::can_send(&self.view.read_input());
        self.view.set_send_enabled(enabled);
    }

    // ---- message exchange ----

    /// Sends whatever is in the input (send control or Enter key).
    pub fn submit(&mut self) -> bool {
        let text = self.view.read_input();
        self.send_message(&text)
    }

    /// Starts one exchange with the assistant. Returns false, touching
    /// nothing, when the text is blank or no session exists yet.
    ///
    /// # Panics
    ///
    /// Panics when a message is dispatched outside a tokio runtime.
    pub fn send_message(&mut self, text: &str) -> bool {
        let Some(request) = exchange::outgoing(text, self.sessions.current()) else {
            debug!("send ignored: empty input or no session");
            return false;
        };

        self.append_message(request.message.clone(), Role::User, false);
        self.view.clear_input();
        self.view.set_send_enabled(false);
        self.show_typing();

        self.pending_sends += 1;
        self.metrics.increment(WidgetEvent::MessageSent);

        let transport = Arc::clone(&self.transport);
        self.spawn_task(TaskKind::Reply, async move {
            Completion::Reply(exchange::exchange(transport.as_ref(), request).await)
        });
        true
    }

    /// Waits for the next spawned task and applies its result. Returns false
    /// when nothing is pending.
    pub async fn next_completion(&mut self) -> bool {
        match self.tasks.join_next_with_id().await {
            None => false,
            Some(Ok((id, completion))) => {
                self.task_kinds.remove(&id);
                self.apply(completion);
                true
            }
            Some(Err(err)) => {
                warn!(error = %err, "widget task did not complete");
                match self.task_kinds.remove(&err.id()) {
                    Some(TaskKind::Reply) => self.on_reply(Err(err.into())),
                    Some(TaskKind::Session) => {
                        self.on_session(Session::local(), SessionSource::Fallback)
                    }
                    Some(TaskKind::Attention { generation }) => self.settle_attention(generation),
                    None => {}
                }
                true
            }
        }
    }

    /// Applies completions until no task is left.
    pub async fn run_until_idle(&mut self) {
        while self.next_completion().await {}
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Session { session, source } => self.on_session(session, source),
            Completion::Reply(outcome) => self.on_reply(outcome),
            Completion::AttentionElapsed { generation } => self.settle_attention(generation),
        }
    }

    fn settle_attention(&mut self, generation: u64) {
        if self.notifier.settle(generation) {
            self.view.set_attention(false);
        }
    }

    fn on_session(&mut self, session: Session, source: SessionSource) {
        if source == SessionSource::Fallback {
            self.metrics.increment(WidgetEvent::FallbackSession);
        }
        let id = session.id.clone();
        if !self.sessions.adopt(session) {
            warn!(session_id = %id, "session already set, ignoring");
        }
    }

    fn on_reply(&mut self, outcome: Result<ChatReply>) {
        self.pending_sends = self.pending_sends.saturating_sub(1);
        self.hide_typing();

        match outcome {
            Ok(reply) => {
                self.metrics.increment(WidgetEvent::ReplyReceived);
                self.append_message(reply.reply.clone(), Role::Bot, false);
                if !reply.products().is_empty() {
                    self.append_product_recommendations(reply.products());
                }
            }
            Err(err) => {
                warn!(error = %err, "chat exchange failed");
                self.metrics.increment(WidgetEvent::SendFailed);
                let fallback = self.config.fallback_reply.clone();
                self.append_message(fallback, Role::Bot, false);
            }
        }

        // Concurrent sends share the one placeholder slot.
        if self.pending_sends > 0 {
            self.show_typing();
        }
    }

    // ---- rendering pipeline ----

    /// Appends a visible entry. A bot entry while the panel is closed also
    /// raises the unread badge; see [`ChatWidget::notify`].
    pub fn append_message(
        &mut self,
        content: impl Into<String>,
        role: Role,
        is_markup: bool,
    ) -> EntryId {
        let lifted = self.hide_typing();
        let entry = self.transcript.push_message(role, content, is_markup);
        let id = entry.id;
        self.view.append_entry(entry);
        self.view.scroll_to_latest();
        if lifted {
            self.show_typing();
        }
        if role == Role::Bot {
            self.notify();
        }
        id
    }

    pub fn append_product_recommendations(&mut self, products: &[Product]) -> EntryId {
        let block = RecommendationBlock::new(self.config.recommendations_header.clone(), products);
        let lifted = self.hide_typing();
        let entry = self.transcript.push_recommendations(block);
        let id = entry.id;
        self.view.append_entry(entry);
        self.view.scroll_to_latest();
        if lifted {
            self.show_typing();
        }
        self.metrics.increment(WidgetEvent::RecommendationsShown);
        id
    }

    /// Expands card `index` of recommendation entry `entry` into a detailed
    /// bot message. Purely local; no request is made.
    pub fn select_product(&mut self, entry: EntryId, index: usize) -> Option<EntryId> {
        let product = self
            .transcript
            .get(entry)?
            .recommendations()?
            .cards
            .get(index)?
            .product
            .clone();
        info!(product = %product.name, "product details opened");
        self.metrics.increment(WidgetEvent::ProductDetailsOpened);
        Some(self.append_message(render::product_details(&product), Role::Bot, true))
    }

    fn show_typing(&mut self) {
        if let Some(id) = self.transcript.show_typing() {
            self.view.show_typing(id);
            self.view.scroll_to_latest();
        }
    }

    // Entries appended while a placeholder shows lift it and put it back
    // below the new entry, so it stays last.
    fn hide_typing(&mut self) -> bool {
        match self.transcript.hide_typing() {
            Some(id) => {
                self.view.remove_typing(id);
                true
            }
            None => false,
        }
    }

    // ---- notification signaling ----

    /// Flags unread bot activity. Does nothing while the panel is visible.
    ///
    /// The attention animation needs a timer; outside a tokio runtime only
    /// the badge is shown.
    pub fn notify(&mut self) {
        if !self.state.mark_unread() {
            return;
        }
        let ticket = self.notifier.raise();
        self.view.show_badge(self.notifier.glyph());

        if tokio::runtime::Handle::try_current().is_err() {
            debug!("no runtime, skipping attention animation");
            self.notifier.settle(ticket.generation);
            return;
        }
        self.view.set_attention(true);
        self.spawn_task(
            TaskKind::Attention {
                generation: ticket.generation,
            },
            async move {
                tokio::time::sleep(ticket.duration).await;
                Completion::AttentionElapsed {
                    generation: ticket.generation,
                }
            },
        );
    }
}
