//! Rendering-agnostic view tree
//!
//! The card produces this declarative structure on every render; it holds
//! data only, no rendering logic. Any frontend (the bundled TUI host, an
//! embedder's own surface) can paint it. Message regions are part of the
//! tree and purely data-driven: text plus a visible flag, addressable by a
//! fixed region id.

/// Region id of the inline error message
pub const ERROR_REGION: &str = "errorMessage";

/// Region id of the transient service (success) message
pub const SERVICE_REGION: &str = "serviceMessage";

/// Top-level render output
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    /// Fixed surface shown while the card has no valid configuration
    Unconfigured,
    Card(CardBody),
}

/// Fully configured card surface
#[derive(Debug, Clone, PartialEq)]
pub struct CardBody {
    /// Title header (may be empty)
    pub header: String,

    /// The single input control
    pub input: InputView,

    /// Inline error region (sticky until the next edit or error)
    pub error: MessageView,

    /// Clear and send actions, in display order
    pub actions: Vec<ActionView>,

    /// Transient service region (auto-hides)
    pub service: MessageView,
}

impl CardBody {
    /// Look up a message region by its id
    pub fn region(&self, region: &str) -> Option<&MessageView> {
        if self.error.region == region {
            Some(&self.error)
        } else if self.service.region == region {
            Some(&self.service)
        } else {
            None
        }
    }
}

/// The input control: one of the two per configuration, never both
#[derive(Debug, Clone, PartialEq)]
pub enum InputView {
    /// Multi-line text field; `max_length` is a hard input cap the frontend
    /// must enforce while routing keys
    TextArea { value: String, max_length: usize },

    /// Single-select list populated in configuration order
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

/// A message region of the card
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub region: &'static str,
    pub text: String,
    pub visible: bool,
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clear,
    Send,
}

/// An action control with its fixed icon and tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub action: Action,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

impl ActionView {
    pub fn clear() -> Self {
        Self {
            action: Action::Clear,
            icon: "mdi:trash-can-outline",
            tooltip: "Clear",
        }
    }

    pub fn send() -> Self {
        Self {
            action: Action::Send,
            icon: "mdi:send",
            tooltip: "Send",
        }
    }
}
