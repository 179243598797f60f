//! Command handlers - state transitions for processing UI events

use std::sync::Arc;

use crate::app::AppState;
use crate::constants::SPINNER_FRAMES;
use crate::messages::{NetworkCommand, NetworkResponse, UiState};
use crate::models::{Field, PendingRequest};
use crate::ui::ResponseView;

/// Rows moved by PageUp/PageDown on the response screen
const PAGE_SCROLL: u16 = 10;

impl AppState {
    // ========================
    // Focus
    // ========================

    pub fn next_field(&mut self) {
        if self.ui_state == UiState::Composing {
            self.focused = self.focused.next();
            self.update_focus();
        }
    }

    pub fn prev_field(&mut self) {
        if self.ui_state == UiState::Composing {
            self.focused = self.focused.prev();
            self.update_focus();
        }
    }

    /// Focus the remembered field while composing, blur everything otherwise
    fn update_focus(&mut self) {
        match self.ui_state {
            UiState::Composing => self.fields.focus_only(self.focused),
            UiState::Sending | UiState::Displaying => self.fields.blur_all(),
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn enter_char(&mut self, c: char) {
        if let Some(input) = self.current_input_mut() {
            input.insert_char(c);
        }
    }

    pub fn enter_newline(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.insert_newline();
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.backspace();
        }
    }

    pub fn delete_char_forward(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.delete();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_right();
        }
    }

    pub fn move_cursor_up(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_up();
        }
    }

    pub fn move_cursor_down(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_down();
        }
    }

    pub fn move_cursor_home(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_home();
        }
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.move_end();
        }
    }

    // ========================
    // Request sending
    // ========================

    /// Build the request from the fields and switch to Sending.
    ///
    /// Returns `None` (and changes nothing) unless composing with a non-empty URL.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.ui_state != UiState::Composing {
            return None;
        }

        let request = PendingRequest::from_fields(
            self.fields.value(Field::Url),
            self.fields.value(Field::Method),
            self.fields.value(Field::Headers),
            self.fields.value(Field::Body),
        )?;

        let id = self.next_id();
        self.pending_request_id = Some(id);
        self.spinner_frame = 0;
        self.ui_state = UiState::Sending;
        self.update_focus();
        tracing::debug!(id, "Composing -> Sending");

        Some(NetworkCommand::Dispatch { id, request })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();
        if self.ui_state != UiState::Sending || self.pending_request_id != Some(response_id) {
            tracing::warn!(id = response_id, "Dropping unexpected completion");
            return;
        }

        match response {
            NetworkResponse::Completed { outcome, .. } => {
                self.response = Some(Arc::new(ResponseView::new(outcome)));
            }
        }
        self.pending_request_id = None;
        self.response_scroll = 0;
        self.ui_state = UiState::Displaying;
        tracing::debug!(id = response_id, "Sending -> Displaying");
    }

    /// Back to editing with the previous field focused and values untouched
    pub fn back_to_composing(&mut self) {
        if self.ui_state == UiState::Displaying {
            self.ui_state = UiState::Composing;
            self.update_focus();
            tracing::debug!("Displaying -> Composing");
        }
    }

    // ========================
    // Progress indicator
    // ========================

    /// Advance the spinner; returns true if anything visible changed
    pub fn tick(&mut self) -> bool {
        if self.ui_state != UiState::Sending {
            return false;
        }
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        true
    }

    // ========================
    // Response scrolling
    // ========================

    pub fn scroll_up(&mut self, rows: u16) {
        if self.ui_state == UiState::Displaying {
            self.response_scroll = self.response_scroll.saturating_sub(rows);
        }
    }

    pub fn scroll_down(&mut self, rows: u16) {
        if self.ui_state == UiState::Displaying {
            self.response_scroll = self.response_scroll.saturating_add(rows);
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE_SCROLL);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE_SCROLL);
    }
}
