// src/services/exchange.rs
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    message::{ChatReply, ChatRequest},
    services::{
        session_manager::{Session, SessionSource},
        transport::ChatTransport,
    },
};

/// Result of a spawned widget task, delivered back to the controller.
#[derive(Debug)]
pub enum Completion {
    Session {
        session: Session,
        source: SessionSource,
    },
    Reply(Result<ChatReply>),
    AttentionElapsed {
        generation: u64,
    },
}

/// Builds the outgoing message, or `None` when nothing may be sent.
pub fn outgoing(text: &str, session: Option<&Session>) -> Option<ChatRequest> {
    let message = text.trim();
    if message.is_empty() {
        return None;
    }
    let session = session?;
    Some(ChatRequest {
        message: message.to_string(),
        session_id: session.id.clone(),
    })
}

/// One round trip to `/chat`. Errors are returned to the caller untouched;
/// there is no retry.
pub async fn exchange<T>(transport: &T, request: ChatRequest) -> Result<ChatReply>
where
    T: ChatTransport + ?Sized,
{
    debug!(session_id = %request.session_id, "sending chat message");
    let reply = transport.send_chat(&request).await?;

    if let Some(echoed) = reply
        .session_id
        .as_deref()
        .filter(|echoed| *echoed != request.session_id)
    {
        warn!(session_id = %request.session_id, echoed, "reply carries a different session id");
    }
    info!(
        session_id = %request.session_id,
        products = reply.products().len(),
        needs_more_info = reply.needs_more_info,
        "reply received"
    );
    Ok(reply)
}
