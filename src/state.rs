// src/state.rs
use serde::Serialize;

/// Visual state of the widget panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VisualState {
    #[default]
    Closed,
    Open,
    OpenMinimized,
}

impl VisualState {
    pub fn is_visible(self) -> bool {
        !matches!(self, VisualState::Closed)
    }

    /// Open and minimized both close fully; minimized never survives a close.
    pub fn toggle_open(self) -> Self {
        match self {
            VisualState::Closed => VisualState::Open,
            VisualState::Open | VisualState::OpenMinimized => VisualState::Closed,
        }
    }

    pub fn toggle_minimize(self) -> Self {
        match self {
            VisualState::Closed => VisualState::Closed,
            VisualState::Open => VisualState::OpenMinimized,
            VisualState::OpenMinimized => VisualState::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WidgetState {
    visual: VisualState,
    has_unread: bool,
}

impl WidgetState {
    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn has_unread(&self) -> bool {
        self.has_unread
    }

    pub fn toggle_open(&mut self) -> VisualState {
        self.visual = self.visual.toggle_open();
        if self.visual == VisualState::Open {
            self.has_unread = false;
        }
        self.visual
    }

    pub fn toggle_minimize(&mut self) -> VisualState {
        self.visual = self.visual.toggle_minimize();
        self.visual
    }

    /// Marks unread bot activity. Returns false (and changes nothing) while
    /// the panel is visible.
    pub fn mark_unread(&mut self) -> bool {
        if self.visual.is_visible() {
            return false;
        }
        self.has_unread = true;
        true
    }
}

/// Whether the send control should be enabled for the given input.
pub fn can_send(input: &str) -> bool {
    !input.trim().is_empty()
}
