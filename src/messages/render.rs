//! Render state - data structure sent from App layer to UI for rendering

use std::sync::Arc;

use crate::app::state::FieldSet;
use crate::messages::ui_events::UiState;
use crate::models::Field;
use crate::ui::ResponseView;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub ui_state: UiState,

    // Composing
    pub fields: FieldSet,
    pub focused: Field,

    // Sending
    pub spinner_frame: usize,

    // Displaying
    pub response: Option<Arc<ResponseView>>,
    pub response_scroll: u16,
}

impl Default for RenderState {
    fn default() -> Self {
        crate::app::AppState::new().to_render_state()
    }
}
