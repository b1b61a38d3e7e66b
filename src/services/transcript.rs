// src/services/transcript.rs
use chrono::Local;
use serde::Serialize;

use crate::services::render::RecommendationBlock;

pub type EntryId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Role {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EntryBody {
    Message { content: String, is_markup: bool },
    Recommendations(RecommendationBlock),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub role: Role,
    pub body: EntryBody,
    pub timestamp: String,
}

impl TranscriptEntry {
    /// Text of a message entry; `None` for recommendation blocks.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            EntryBody::Message { content, .. } => Some(content),
            EntryBody::Recommendations(_) => None,
        }
    }

    pub fn recommendations(&self) -> Option<&RecommendationBlock> {
        match &self.body {
            EntryBody::Recommendations(block) => Some(block),
            EntryBody::Message { .. } => None,
        }
    }
}

/// Append-only list of rendered entries plus the single typing-placeholder
/// slot. The placeholder always sits after the last entry.
#[derive(Debug)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    typing: Option<EntryId>,
    next_id: EntryId,
    time_format: String,
}

impl Transcript {
    pub fn new(time_format: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            typing: None,
            next_id: 1,
            time_format: time_format.into(),
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn timestamp(&self) -> String {
        Local::now().format(&self.time_format).to_string()
    }

    pub fn push_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        is_markup: bool,
    ) -> &TranscriptEntry {
        self.push(
            role,
            EntryBody::Message {
                content: content.into(),
                is_markup,
            },
        )
    }

    pub fn push_recommendations(&mut self, block: RecommendationBlock) -> &TranscriptEntry {
        self.push(Role::Bot, EntryBody::Recommendations(block))
    }

    fn push(&mut self, role: Role, body: EntryBody) -> &TranscriptEntry {
        let entry = TranscriptEntry {
            id: self.allocate_id(),
            role,
            body,
            timestamp: self.timestamp(),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn typing(&self) -> Option<EntryId> {
        self.typing
    }

    /// Fills the placeholder slot. Returns the new id, or `None` if a
    /// placeholder is already showing.
    pub fn show_typing(&mut self) -> Option<EntryId> {
        if self.typing.is_some() {
            return None;
        }
        let id = self.allocate_id();
        self.typing = Some(id);
        Some(id)
    }

    pub fn hide_typing(&mut self) -> Option<EntryId> {
        self.typing.take()
    }
}
