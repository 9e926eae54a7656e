//! Host bridge for outbound events
//!
//! The card never talks to the automation platform directly; it hands a
//! `FireEventRequest` to whatever `HostBridge` the host supplied. Dispatch is
//! fire-and-forget: the card does not wait for the platform to act, it only
//! catches an immediate failure for error display.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Service-bus request type every card event is wrapped in
pub const REQUEST_TYPE: &str = "fire_event";

/// A "fire named event" request for the platform's service bus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireEventRequest {
    pub event_type: String,
    pub event_data: Value,
}

impl FireEventRequest {
    /// Build the request the card sends: a named event carrying the value
    pub fn value_event(event_type: &str, value: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            event_data: json!({ "value": value }),
        }
    }
}

/// Dispatch failures, caught by the card and downgraded to an inline error
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host bridge is closed")]
    Closed,

    #[error("host bridge rejected the event: {0}")]
    Rejected(String),
}

/// Host-provided channel for dispatching named events to the platform
pub trait HostBridge {
    fn fire_event(&self, request: FireEventRequest) -> Result<(), BridgeError>;
}

/// Bridge that forwards events over an unbounded channel to the host's
/// platform task
pub struct ChannelBridge {
    events: UnboundedSender<FireEventRequest>,
}

impl ChannelBridge {
    pub fn new(events: UnboundedSender<FireEventRequest>) -> Self {
        Self { events }
    }
}

impl HostBridge for ChannelBridge {
    fn fire_event(&self, request: FireEventRequest) -> Result<(), BridgeError> {
        self.events.send(request).map_err(|_| BridgeError::Closed)
    }
}

/// Bridge that records fired events instead of dispatching them.
/// Used by the card's own tests; embedders can use it in theirs.
#[derive(Default)]
pub struct RecordingBridge {
    events: Mutex<Vec<FireEventRequest>>,
    rejecting: AtomicBool,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent dispatch fail
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Snapshot of everything fired so far
    pub fn fired(&self) -> Vec<FireEventRequest> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl HostBridge for RecordingBridge {
    fn fire_event(&self, request: FireEventRequest) -> Result<(), BridgeError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(BridgeError::Rejected("recording bridge set to reject".to_string()));
        }

        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_event_shape() {
        let request = FireEventRequest::value_event("scene_selected", "evening");
        assert_eq!(request.event_type, "scene_selected");
        assert_eq!(request.event_data, json!({ "value": "evening" }));
    }

    #[test]
    fn test_recording_bridge_captures_events() {
        let bridge = RecordingBridge::new();
        bridge
            .fire_event(FireEventRequest::value_event("e", "v"))
            .unwrap();

        let fired = bridge.fired();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].event_type, "e");
    }

    #[test]
    fn test_recording_bridge_can_reject() {
        let bridge = RecordingBridge::new();
        bridge.set_rejecting(true);

        let err = bridge
            .fire_event(FireEventRequest::value_event("e", "v"))
            .unwrap_err();
        assert!(matches!(err, BridgeError::Rejected(_)));
        assert!(bridge.fired().is_empty());
    }

    #[test]
    fn test_channel_bridge_forwards() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let bridge = ChannelBridge::new(tx);

        bridge
            .fire_event(FireEventRequest::value_event("e", "v"))
            .unwrap();

        let received = rx.try_recv().unwrap();
        assert_eq!(received.event_type, "e");
    }

    #[test]
    fn test_channel_bridge_closed() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let bridge = ChannelBridge::new(tx);

        let err = bridge
            .fire_event(FireEventRequest::value_event("e", "v"))
            .unwrap_err();
        assert!(matches!(err, BridgeError::Closed));
    }
}
