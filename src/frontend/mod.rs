//! Reference host frontends
//!
//! The card itself is host-agnostic; it produces a view tree and fires
//! events through a bridge. This module holds the bundled reference host, a
//! ratatui TUI that embeds one card, routes keys to it, and paints its view
//! tree. A real dashboard would do the same with its own surface.

pub mod tui;

pub use tui::TuiHost;
