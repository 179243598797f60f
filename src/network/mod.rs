//! Network layer - HTTP request execution
//!
//! The Network actor receives dispatch commands and sends back one outcome per request.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
