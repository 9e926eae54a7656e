//! Transient message state
//!
//! Each card has two message slots: a sticky error slot (cleared by the next
//! edit or replaced by the next error) and a transient service slot that
//! auto-hides. Auto-hide is deadline-based: showing a message stores its
//! expiry instant and the host's tick loop calls `expire`. Showing a new
//! message overwrites the deadline, which supersedes any pending hide.

use crate::view::MessageView;
use std::time::{Duration, Instant};

/// How long a transient service message stays visible
pub const AUTO_HIDE: Duration = Duration::from_millis(2000);

/// One message region's state: text, visibility, and an optional expiry
#[derive(Debug, Clone, Default)]
pub struct MessageSlot {
    text: String,
    visible: bool,
    expires_at: Option<Instant>,
}

impl MessageSlot {
    /// Show a sticky message (stays until cleared or replaced)
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
        self.expires_at = None;
    }

    /// Show a message that auto-hides after `ttl`
    pub fn show_for(&mut self, text: impl Into<String>, ttl: Duration, now: Instant) {
        self.text = text.into();
        self.visible = true;
        self.expires_at = Some(now + ttl);
    }

    /// Empty and hide the slot
    pub fn clear(&mut self) {
        self.text.clear();
        self.visible = false;
        self.expires_at = None;
    }

    /// Clear the slot if its deadline has passed. Returns whether anything
    /// changed; safe to call repeatedly.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Snapshot for the view tree
    pub fn view(&self, region: &'static str, is_error: bool) -> MessageView {
        MessageView {
            region,
            text: self.text.clone(),
            visible: self.visible,
            is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_clear() {
        let mut slot = MessageSlot::default();
        assert!(!slot.is_visible());

        slot.show("Input cannot be empty.");
        assert!(slot.is_visible());
        assert_eq!(slot.text(), "Input cannot be empty.");

        slot.clear();
        assert!(!slot.is_visible());
        assert_eq!(slot.text(), "");
    }

    #[test]
    fn test_sticky_message_never_expires() {
        let now = Instant::now();
        let mut slot = MessageSlot::default();
        slot.show("error");

        assert!(!slot.expire(now + Duration::from_secs(60)));
        assert!(slot.is_visible());
    }

    #[test]
    fn test_expiry_after_deadline() {
        let now = Instant::now();
        let mut slot = MessageSlot::default();
        slot.show_for("Value sent.", AUTO_HIDE, now);

        assert!(!slot.expire(now + Duration::from_millis(1999)));
        assert!(slot.is_visible());

        assert!(slot.expire(now + Duration::from_millis(2000)));
        assert!(!slot.is_visible());

        // Idempotent
        assert!(!slot.expire(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_new_message_restarts_deadline() {
        let t0 = Instant::now();
        let mut slot = MessageSlot::default();
        slot.show_for("Value cleared.", AUTO_HIDE, t0);

        let t1 = t0 + Duration::from_secs(1);
        slot.show_for("Value sent.", AUTO_HIDE, t1);

        // Old deadline has passed, new one has not
        assert!(!slot.expire(t0 + AUTO_HIDE));
        assert!(slot.is_visible());
        assert_eq!(slot.text(), "Value sent.");

        assert!(slot.expire(t1 + AUTO_HIDE));
        assert!(!slot.is_visible());
    }
}
