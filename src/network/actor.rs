//! Network actor - runs HTTP requests in the Tokio async runtime

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::constants::REQUEST_TIMEOUT;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_request};

/// Network actor that processes dispatch commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        Self::with_timeout(response_tx, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
        timeout: Duration,
    ) -> Self {
        NetworkActor {
            client: create_client(timeout),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Dispatch { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            // Runs to completion, error or timeout; nothing cancels it
                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %request.url, method = %request.method, "Executing request");
                                let outcome = execute_request(&client, request).await;
                                tracing::info!(id, failed = outcome.is_failure(), "Request completed");
                                let _ = response_tx.send(NetworkResponse::Completed { id, outcome });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::models::{HeaderSet, HttpOutcome, PendingRequest};

    #[tokio::test]
    async fn test_dispatch_reports_exactly_once() {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Dispatch {
                id: 7,
                request: PendingRequest {
                    method: "GET".into(),
                    url: "::not-a-url::".into(),
                    headers: HeaderSet::default(),
                    body: None,
                },
            })
            .unwrap();

        match resp_rx.recv().await {
            Some(NetworkResponse::Completed { id, outcome }) => {
                assert_eq!(id, 7);
                assert!(matches!(outcome, HttpOutcome::Failure(DispatchError::Construction(_))));
            }
            None => panic!("actor dropped the response channel"),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert!(resp_rx.recv().await.is_none());
    }
}
