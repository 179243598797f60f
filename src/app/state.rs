//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::constants::{DEFAULT_HTTP_URL, DEFAULT_METHOD, METHOD_CHAR_LIMIT, URL_CHAR_LIMIT};
use crate::input::TextInput;
use crate::messages::{RenderState, UiState};
use crate::models::Field;
use crate::ui::ResponseView;

/// The four request inputs, one per `Field`
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSet {
    inputs: [TextInput; 4],
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet {
            inputs: [
                TextInput::single_line("Enter URL here...")
                    .with_char_limit(URL_CHAR_LIMIT)
                    .with_value(DEFAULT_HTTP_URL),
                TextInput::single_line(DEFAULT_METHOD)
                    .with_char_limit(METHOD_CHAR_LIMIT)
                    .with_value(DEFAULT_METHOD),
                TextInput::multi_line("Content-Type: application/json"),
                TextInput::multi_line("Request body (for POST/PUT)"),
            ],
        }
    }
}

impl FieldSet {
    pub fn get(&self, field: Field) -> &TextInput {
        &self.inputs[field.index()]
    }

    pub fn get_mut(&mut self, field: Field) -> &mut TextInput {
        &mut self.inputs[field.index()]
    }

    pub fn value(&self, field: Field) -> &str {
        self.get(field).value()
    }

    pub fn blur_all(&mut self) {
        self.inputs.iter_mut().for_each(TextInput::blur);
    }

    /// Blur every input, then focus `field`
    pub fn focus_only(&mut self, field: Field) {
        self.blur_all();
        self.get_mut(field).focus();
    }

    /// The input currently accepting keystrokes, if any
    pub fn focused(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| self.get(*f).is_focused())
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub ui_state: UiState,

    // Request fields
    pub fields: FieldSet,
    /// Survives the trip through Sending and Displaying
    pub focused: Field,

    // Request tracking
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Progress indicator
    pub spinner_frame: usize,

    // Last outcome, replaced on every completion. Shared with every snapshot.
    pub response: Option<Arc<ResponseView>>,
    pub response_scroll: u16,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut fields = FieldSet::default();
        fields.focus_only(Field::Url);
        AppState {
            ui_state: UiState::Composing,
            fields,
            focused: Field::Url,
            next_request_id: 1,
            pending_request_id: None,
            spinner_frame: 0,
            response: None,
            response_scroll: 0,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Input for the focused field, only while composing
    pub fn current_input_mut(&mut self) -> Option<&mut TextInput> {
        if self.ui_state != UiState::Composing {
            return None;
        }
        Some(self.fields.get_mut(self.focused))
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            ui_state: self.ui_state,
            fields: self.fields.clone(),
            focused: self.focused,
            spinner_frame: self.spinner_frame,
            response: self.response.clone(),
            response_scroll: self.response_scroll,
        }
    }
}
