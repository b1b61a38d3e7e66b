// src/services/notifier.rs
use std::time::Duration;

/// Badge and attention-animation bookkeeping for unread bot activity.
///
/// Every `raise` starts a new attention generation; only the timer of the
/// latest generation may clear the animation.
#[derive(Debug)]
pub struct Notifier {
    glyph: String,
    duration: Duration,
    generation: u64,
    attention: Option<u64>,
    badge_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttentionTicket {
    pub generation: u64,
    pub duration: Duration,
}

impl Notifier {
    pub fn new(glyph: impl Into<String>, duration: Duration) -> Self {
        Self {
            glyph: glyph.into(),
            duration,
            generation: 0,
            attention: None,
            badge_visible: false,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn badge_visible(&self) -> bool {
        self.badge_visible
    }

    pub fn attention_active(&self) -> bool {
        self.attention.is_some()
    }

    pub fn raise(&mut self) -> AttentionTicket {
        self.generation += 1;
        self.attention = Some(self.generation);
        self.badge_visible = true;
        AttentionTicket {
            generation: self.generation,
            duration: self.duration,
        }
    }

    /// Ends the animation if `generation` is still the current one.
    pub fn settle(&mut self, generation: u64) -> bool {
        if self.attention == Some(generation) {
            self.attention = None;
            return true;
        }
        false
    }

    pub fn clear_badge(&mut self) {
        self.badge_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_does_not_clear_newer_attention() {
        let mut notifier = Notifier::new("!", Duration::from_millis(500));
        let first = notifier.raise();
        let second = notifier.raise();
        assert!(!notifier.settle(first.generation));
        assert!(notifier.attention_active());
        assert!(notifier.settle(second.generation));
        assert!(!notifier.attention_active());
        assert!(notifier.badge_visible());

        notifier.clear_badge();
        assert!(!notifier.badge_visible());
    }
}
