//! input-card - Free-text / single-select input card for smart-home dashboards
//!
//! The card renders either a multi-line text field or a single-select list,
//! plus clear and send actions, and emits the chosen value as a named event
//! through the host's service bus. Validation and sanitization happen before
//! anything leaves the card.

pub mod config;
pub mod core;
pub mod frontend;
pub mod registry;
pub mod sanitize;
pub mod view;

pub use crate::config::{CardConfig, CardOptions, ConfigError};
pub use crate::core::{
    BridgeError, ChannelBridge, FireEventRequest, HostBridge, InputCard, RecordingBridge,
};
pub use crate::view::CardView;
