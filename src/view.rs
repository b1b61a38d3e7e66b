// src/view.rs
use crate::{
    services::transcript::{EntryId, TranscriptEntry},
    state::VisualState,
};

/// Host-page elements the controller drives: the floating toggle, the panel
/// with its minimize control, the message list, the input, the send control
/// and the notification badge.
///
/// The controller never looks elements up itself; a page binding or a test
/// double implements this trait.
pub trait WidgetView {
    fn set_panel_state(&mut self, state: VisualState);
    fn set_toggle_visible(&mut self, visible: bool);
    fn set_minimize_label(&mut self, label: &str);

    fn append_entry(&mut self, entry: &TranscriptEntry);
    /// The typing placeholder has no timestamp and is removed by id.
    fn show_typing(&mut self, id: EntryId);
    fn remove_typing(&mut self, id: EntryId);
    fn scroll_to_latest(&mut self);
    /// Stamps the static greeting the page ships with.
    fn stamp_greeting(&mut self, timestamp: &str);

    fn read_input(&self) -> String;
    fn clear_input(&mut self);
    fn focus_input(&mut self);
    fn set_send_enabled(&mut self, enabled: bool);

    fn show_badge(&mut self, glyph: &str);
    fn hide_badge(&mut self);
    /// Starts or stops the attention animation on the toggle control.
    fn set_attention(&mut self, active: bool);
}
