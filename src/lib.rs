//! # HTTP Endpoint Tester
//!
//! Compose a single HTTP request in the terminal, fire it, and inspect the
//! response.
//!
//! ## Screens
//! - Composing: URL, Method, Headers and Body fields, one focused at a time
//! - Sending: spinner while the request is in flight (not cancellable)
//! - Displaying: status, headers and (pretty-printed) body, or the error
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - key polling and drawing
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod constants;
pub mod error;
pub mod input;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{Field, HeaderSet, HttpOutcome, HttpResponse, PendingRequest, ResponseHeaders};
pub use error::DispatchError;
pub use messages::{UiEvent, UiState, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
