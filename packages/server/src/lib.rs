//! Parlor chat server library.
//!
//! A real-time conversation backend: multi-user chat rooms over WebSocket,
//! with an AI responder generating a reply to every accepted message. The
//! reply is produced off the socket path by a background dispatcher, so the
//! transport never waits on inference.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
