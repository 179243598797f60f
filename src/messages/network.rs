//! Network messages - communication between App and Network layers

use crate::models::{HttpOutcome, PendingRequest};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fire one request; exactly one `Completed` comes back for `id`
    Dispatch { id: u64, request: PendingRequest },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Completed { id: u64, outcome: HttpOutcome },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }
}
