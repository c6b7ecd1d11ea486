//! UI layer: Axum router, WebSocket and HTTP handlers, shared state.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
