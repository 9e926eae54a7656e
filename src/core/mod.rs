//! Core card logic layer
//!
//! Configuration handling, validation, message state, and event dispatch.
//! NO rendering code here; frontends read the view tree and paint it.

pub mod bridge;
pub mod card;
pub mod message;

pub use bridge::{BridgeError, ChannelBridge, FireEventRequest, HostBridge, RecordingBridge};
pub use card::InputCard;
pub use message::{MessageSlot, AUTO_HIDE};
