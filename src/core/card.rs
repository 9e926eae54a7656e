//! The input card controller
//!
//! Owns configuration, the current value, both message slots, and outbound
//! dispatch. Every public mutator ends by raising `needs_render`; the host
//! re-renders whenever the flag is set, so the view tree is always a pure
//! function of the card's state.

use crate::config::{CardConfig, CardOptions, ConfigError};
use crate::core::bridge::{FireEventRequest, HostBridge};
use crate::core::message::{MessageSlot, AUTO_HIDE};
use crate::sanitize::sanitize;
use crate::view::{ActionView, CardBody, CardView, InputView, ERROR_REGION, SERVICE_REGION};
use std::sync::Arc;
use std::time::Instant;

const MSG_EMPTY: &str = "Input cannot be empty.";
const MSG_FORMAT: &str = "Input does not match the required format.";
const MSG_INVALID_SELECTION: &str = "Invalid selection.";
const MSG_SEND_FAILED: &str = "An error occurred while sending the value.";
const MSG_SENT: &str = "Value sent.";
const MSG_CLEARED: &str = "Value cleared.";

/// Free-text / single-select input card
pub struct InputCard {
    config: Option<CardConfig>,
    value: String,
    error: MessageSlot,
    service: MessageSlot,
    bridge: Arc<dyn HostBridge>,

    /// Raised by every mutation; the host re-renders and clears it
    pub needs_render: bool,
}

impl InputCard {
    /// Create an unconfigured card. It renders the invalid-configuration
    /// surface until `set_config` succeeds.
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        Self {
            config: None,
            value: String::new(),
            error: MessageSlot::default(),
            service: MessageSlot::default(),
            bridge,
            needs_render: false,
        }
    }

    /// Apply card setup data. On failure the card stays unconfigured and the
    /// host falls back to its invalid-configuration display.
    pub fn set_config(&mut self, options: Option<CardOptions>) -> Result<(), ConfigError> {
        let result = CardConfig::from_options(options);

        match result {
            Ok(config) => {
                self.value = config.initial_value();
                self.config = Some(config);
                self.error.clear();
                self.service.clear();
                self.needs_render = true;
                Ok(())
            }
            Err(e) => {
                self.config = None;
                self.needs_render = true;
                Err(e)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Height hint for the host layout, in grid rows
    pub fn card_size(&self) -> u16 {
        3
    }

    /// The user edited the value (keystroke or selection change).
    /// Clears the error region; the service region is left alone.
    pub fn handle_value_edited(&mut self, new_value: &str) {
        self.value = new_value.to_string();
        self.error.clear();
        self.needs_render = true;
    }

    /// Reset the value to its starting state and confirm it to the user
    pub fn clear_value(&mut self, now: Instant) {
        let Some(config) = &self.config else {
            return;
        };

        self.value = config.initial_value();
        self.service.show_for(MSG_CLEARED, AUTO_HIDE, now);
        self.needs_render = true;
    }

    /// Validate, sanitize, and dispatch the current value as a named event.
    /// On validation failure nothing is sent and only the error region is
    /// populated. A failing bridge is logged and downgraded to an inline
    /// error; it never takes the card down.
    pub fn send_value(&mut self, now: Instant) {
        let Some(config) = &self.config else {
            return;
        };
        let use_text_input = config.use_text_input;
        let event_name = config.event_name.clone();

        let value = self.value.clone();
        let valid = if use_text_input {
            self.validate_text(&value)
        } else {
            self.validate_select(&value)
        };
        if !valid {
            return;
        }

        let sanitized = sanitize(&value);
        let request = FireEventRequest::value_event(&event_name, &sanitized);

        match self.bridge.fire_event(request) {
            Ok(()) => {
                self.service.show_for(MSG_SENT, AUTO_HIDE, now);
            }
            Err(e) => {
                tracing::error!(error = ?e, event = %event_name, "failed to dispatch input event");
                self.error.show(MSG_SEND_FAILED);
            }
        }

        self.needs_render = true;
    }

    /// Text-mode validation. Sets the error region on failure.
    pub fn validate_text(&mut self, value: &str) -> bool {
        let Some(config) = &self.config else {
            return false;
        };

        let failure = if value.trim().is_empty() {
            Some(MSG_EMPTY.to_string())
        } else if value.chars().count() > config.max_length {
            Some(format!(
                "Input cannot exceed {} characters.",
                config.max_length
            ))
        } else if config.pattern.as_ref().is_some_and(|re| !re.is_match(value)) {
            Some(MSG_FORMAT.to_string())
        } else {
            None
        };

        match failure {
            Some(message) => {
                self.error.show(message);
                self.needs_render = true;
                false
            }
            None => true,
        }
    }

    /// Select-mode validation: the value must be one of the configured
    /// options. Sets the error region on failure.
    pub fn validate_select(&mut self, value: &str) -> bool {
        let Some(config) = &self.config else {
            return false;
        };

        if config.select_options.iter().any(|option| option == value) {
            true
        } else {
            self.error.show(MSG_INVALID_SELECTION);
            self.needs_render = true;
            false
        }
    }

    /// Clear any message whose auto-hide deadline has passed. Called from
    /// the host's tick loop; idempotent.
    pub fn expire_messages(&mut self, now: Instant) {
        let mut changed = self.error.expire(now);
        changed |= self.service.expire(now);

        if changed {
            self.needs_render = true;
        }
    }

    /// Produce the declarative view tree. Pure function of configuration,
    /// current value, and message state.
    pub fn render(&self) -> CardView {
        let Some(config) = &self.config else {
            return CardView::Unconfigured;
        };

        let input = if config.use_text_input {
            InputView::TextArea {
                value: self.value.clone(),
                max_length: config.max_length,
            }
        } else {
            InputView::Select {
                options: config.select_options.clone(),
                selected: config
                    .select_options
                    .iter()
                    .position(|option| option == &self.value),
            }
        };

        CardView::Card(CardBody {
            header: config.title.clone(),
            input,
            error: self.error.view(ERROR_REGION, true),
            actions: vec![ActionView::clear(), ActionView::send()],
            service: self.service.view(SERVICE_REGION, false),
        })
    }
}
