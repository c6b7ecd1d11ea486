//! Shared utilities for the Parlor chat backend.
//!
//! Hosts the pieces both the server and its tooling need: timestamp
//! handling with a clock abstraction, and logging setup.

pub mod logger;
pub mod time;
