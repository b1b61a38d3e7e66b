// src/services/session_manager.rs
use anyhow::Context;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::WidgetError, services::transport::ChatTransport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// A locally generated session in the same UUID format the service issues.
    pub fn local() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }
}

/// Where the active session id came from. Only used for logging and metrics;
/// the id itself is opaque either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionSource {
    Server,
    Fallback,
}

/// Holds the single session of a page view. The session is written once.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Adopts `session` unless one is already held. Returns whether it was adopted.
    pub fn adopt(&mut self, session: Session) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.current = Some(session);
        true
    }
}

/// Creates the server-side session, falling back to a local id on any error.
/// Never fails and never retries.
pub async fn acquire_session<T>(transport: &T) -> (Session, SessionSource)
where
    T: ChatTransport + ?Sized,
{
    match request_session(transport).await {
        Ok(session) => {
            info!(session_id = %session.id, "session created");
            (session, SessionSource::Server)
        }
        Err(err) => {
            let session = Session::local();
            let reason = format!("{err:#}");
            warn!(error = %reason, session_id = %session.id, "session request failed, using local id");
            (session, SessionSource::Fallback)
        }
    }
}

async fn request_session<T>(transport: &T) -> anyhow::Result<Session>
where
    T: ChatTransport + ?Sized,
{
    let id = transport
        .create_session()
        .await
        .context("POST /session/new")?;
    anyhow::ensure!(!id.trim().is_empty(), WidgetError::InvalidSession);
    Ok(Session::new(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_is_written_once() {
        let mut mgr = SessionManager::new();
        assert!(mgr.current().is_none());
        assert!(mgr.adopt(Session::new("first")));
        assert!(!mgr.adopt(Session::new("second")));
        assert_eq!(mgr.current().unwrap().id, "first");
    }

    #[test]
    fn local_ids_look_like_server_ids() {
        let a = Session::local();
        let b = Session::local();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}
