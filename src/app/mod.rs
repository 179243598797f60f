//! App layer - the session controller
//!
//! The App actor receives UI events and network completions,
//! drives the Composing/Sending/Displaying state machine, and emits
//! network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::{AppState, FieldSet};
pub use actor::AppActor;
