//! Interaction controller for an embeddable storefront chat widget.
//!
//! [`ChatWidget`] owns the widget's visual state, the conversation session,
//! the transcript and the unread badge. It talks to the assistant service
//! through a [`ChatTransport`] and to the host page through a [`WidgetView`].

pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod state;
pub mod view;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{Result, WidgetError};
pub use message::{ChatReply, ChatRequest, Product};
pub use services::render::{ProductCard, RecommendationBlock};
pub use services::session_manager::Session;
pub use services::transcript::{EntryBody, EntryId, Role, TranscriptEntry};
pub use services::transport::{ChatTransport, HttpTransport};
pub use state::{VisualState, WidgetState};
pub use view::WidgetView;
pub use widget::ChatWidget;
