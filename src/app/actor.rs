//! App actor - message loop processing UI events, network completions and ticks

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::app::state::AppState;
use crate::constants::SPINNER_TICK;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns the session controller state
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut ticker = time::interval(SPINNER_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Send initial render state
        self.publish();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                _ = ticker.tick() => {
                    if self.state.tick() {
                        self.publish();
                    }
                }
                else => break,
            }
        }
    }

    fn publish(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    pub fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Input editing
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Newline => self.state.enter_newline(),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::Delete => self.state.delete_char_forward(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::CursorUp => self.state.move_cursor_up(),
            UiEvent::CursorDown => self.state.move_cursor_down(),
            UiEvent::CursorHome => self.state.move_cursor_home(),
            UiEvent::CursorEnd => self.state.move_cursor_end(),

            // Request
            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.prepare_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Response screen
            UiEvent::Back => self.state.back_to_composing(),
            UiEvent::ScrollUp => self.state.scroll_up(1),
            UiEvent::ScrollDown => self.state.scroll_down(1),
            UiEvent::PageUp => self.state.page_up(),
            UiEvent::PageDown => self.state.page_down(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::messages::UiState;
    use crate::models::{Field, HttpOutcome};

    fn actor() -> (
        AppActor,
        mpsc::UnboundedReceiver<NetworkCommand>,
        mpsc::UnboundedReceiver<RenderState>,
    ) {
        let (net_tx, net_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        (AppActor::new(net_tx, render_tx), net_rx, render_rx)
    }

    #[test]
    fn test_send_emits_single_dispatch() {
        let (mut actor, mut net_rx, _render_rx) = actor();
        assert!(!actor.handle_ui_event(UiEvent::SendRequest));
        assert!(!actor.handle_ui_event(UiEvent::SendRequest));

        match net_rx.try_recv() {
            Ok(NetworkCommand::Dispatch { id, request }) => {
                assert_eq!(id, 1);
                assert_eq!(request.method, "GET");
                assert_eq!(request.url, crate::constants::DEFAULT_HTTP_URL);
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
        assert!(net_rx.try_recv().is_err());
        assert_eq!(actor.state().ui_state, UiState::Sending);
    }

    #[test]
    fn test_empty_url_sends_nothing() {
        let (mut actor, mut net_rx, _render_rx) = actor();
        actor.state.fields.get_mut(Field::Url).set_value("");
        actor.handle_ui_event(UiEvent::SendRequest);
        assert!(net_rx.try_recv().is_err());
        assert_eq!(actor.state().ui_state, UiState::Composing);
    }

    #[test]
    fn test_quit_from_every_state() {
        let (mut actor, _net_rx, _render_rx) = actor();
        assert!(actor.handle_ui_event(UiEvent::Quit));

        actor.handle_ui_event(UiEvent::SendRequest);
        assert_eq!(actor.state().ui_state, UiState::Sending);
        assert!(actor.handle_ui_event(UiEvent::Quit));

        let id = actor.state().pending_request_id.unwrap();
        actor.state.handle_response(NetworkResponse::Completed {
            id,
            outcome: HttpOutcome::Failure(DispatchError::Transport("refused".into())),
        });
        assert_eq!(actor.state().ui_state, UiState::Displaying);
        assert!(actor.handle_ui_event(UiEvent::Quit));
    }

    #[tokio::test]
    async fn test_run_round_trip() {
        let (actor, mut net_rx, mut render_rx) = actor();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(actor.run(ui_rx, resp_rx));

        ui_tx.send(UiEvent::SendRequest).unwrap();
        let id = match net_rx.recv().await {
            Some(NetworkCommand::Dispatch { id, .. }) => id,
            other => panic!("expected dispatch, got {other:?}"),
        };
        resp_tx
            .send(NetworkResponse::Completed {
                id,
                outcome: HttpOutcome::Failure(DispatchError::Transport("timed out".into())),
            })
            .unwrap();

        loop {
            let state = render_rx.recv().await.unwrap();
            if state.ui_state == UiState::Displaying {
                assert!(state.response.is_some());
                break;
            }
        }

        ui_tx.send(UiEvent::Back).unwrap();
        loop {
            let state = render_rx.recv().await.unwrap();
            if state.ui_state == UiState::Composing && state.response.is_some() {
                assert_eq!(state.fields.focused(), Some(Field::Url));
                break;
            }
        }

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
        assert!(matches!(net_rx.recv().await, Some(NetworkCommand::Shutdown)));
    }
}
