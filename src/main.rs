//! HTTP Endpoint Tester - compose one request, fire it, read the response
//!
//! Architecture:
//! - UI Layer (Ratatui) - terminal rendering and key polling
//! - App Layer - session controller state machine
//! - Network Layer (Tokio) - async HTTP execution

use std::io;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use endpoint_tester::app::AppActor;
use endpoint_tester::constants::{APP_NAME, LOG_FILE_NAME, SPINNER_FRAMES, UI_POLL_INTERVAL};
use endpoint_tester::input::TextInput;
use endpoint_tester::messages::ui_events::key_to_ui_event;
use endpoint_tester::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent, UiState};
use endpoint_tester::models::Field;
use endpoint_tester::network::NetworkActor;
use endpoint_tester::ui::{self, RESPONSE_BORDER};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    match run().await {
        Ok(()) => println!("Goodbye!"),
        Err(err) => {
            tracing::error!(error = %err, "Terminal runtime failed");
            println!("{err:#}");
            drop(log_guard);
            std::process::exit(1);
        }
    }
}

/// Set up the terminal and actors, run until quit. The terminal is restored on return.
async fn run() -> anyhow::Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    tracing::info!("Session started");
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;
    tracing::info!("Session ended");

    Ok(())
}

/// Run the UI rendering loop until a quit key is pressed
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(UI_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.ui_state) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    match state.ui_state {
        UiState::Composing => draw_composing(f, state, area),
        UiState::Sending => draw_sending(f, state, area),
        UiState::Displaying => draw_response(f, state, area),
    }
}

fn draw_composing(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title
            Constraint::Length(4),  // URL
            Constraint::Length(4),  // Method
            Constraint::Length(7),  // Headers
            Constraint::Min(5),     // Body
            Constraint::Length(1),  // Help
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("🌐 {APP_NAME}")).style(ui::title_style()),
        chunks[0],
    );

    for (field, chunk) in Field::ALL.into_iter().zip(&chunks[1..5]) {
        draw_field(f, field, state.fields.get(field), *chunk);
    }

    let help = Paragraph::new(
        "📝 Tab/Shift+Tab: switch fields | Enter/Ctrl+S: send request | Alt+Enter: new line | Q: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[5]);
}

/// Label on the first row, bordered input below it
fn draw_field(f: &mut Frame, field: Field, input: &TextInput, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    f.render_widget(Paragraph::new(format!("{}:", field.label())), rows[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ui::field_border_style(input.is_focused()));

    let content = if input.value().is_empty() {
        Text::styled(input.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Text::raw(input.value())
    };

    // Keep the caret visible in long and tall inputs
    let (line, col) = input.cursor_line_col();
    let inner = block.inner(rows[1]);
    let view = ui::caret_view(line, col, inner.width, inner.height);

    f.render_widget(Paragraph::new(content).block(block).scroll(view.scroll), rows[1]);

    if input.is_focused() {
        let (dx, dy) = view.caret;
        f.set_cursor_position(Position::new(inner.x.saturating_add(dx), inner.y.saturating_add(dy)));
    }
}

fn draw_sending(f: &mut Frame, state: &RenderState, area: Rect) {
    let frame = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
    let text = Line::from(vec![
        Span::raw("   "),
        Span::styled(frame, Style::default().fg(ui::ACCENT)),
        Span::raw(" Making HTTP request..."),
    ]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(text), rows[1]);
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title
            Constraint::Min(3),     // Response
            Constraint::Length(1),  // Help
        ])
        .split(area);

    f.render_widget(
        Paragraph::new("📡 HTTP Response").style(ui::title_style()),
        chunks[0],
    );

    let lines = state
        .response
        .as_ref()
        .map(|view| view.lines.clone())
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RESPONSE_BORDER))
        .padding(Padding::horizontal(1));

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, chunks[1]);

    let help = Paragraph::new("🔙 Ctrl+B: go back | ↑/↓ PgUp/PgDn: scroll | Q: quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
