use olumbe_terminal::app::{App, Location, Outcome};
use olumbe_terminal::chat::wire::StreamPart;
use olumbe_terminal::chat::{ChatEvent, MessageMetadata, RecordingTransport, TurnId};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::rc::Rc;

/// Build a minimal `App` for integration testing.
/// No network, no TUI -- just state.
pub fn test_app() -> App {
    App::test_default()
}

/// App on `start` whose transport records every request for inspection.
pub fn recording_app(start: Location) -> (App, RecordingTransport) {
    let transport = RecordingTransport::new();
    (App::test_with(Rc::new(transport.clone()), start), transport)
}

/// Type `text` into the prompt and press Enter.
pub fn submit(app: &mut App, text: &str) -> Outcome {
    app.input.set_text(text);
    app.submit_input()
}

pub fn start(turn: TurnId, message_id: &str, created_at: Option<u64>) -> ChatEvent {
    ChatEvent::Part {
        turn,
        part: StreamPart::Start {
            message_id: Some(message_id.to_owned()),
            message_metadata: created_at.map(MessageMetadata::created_at),
        },
    }
}

pub fn delta(turn: TurnId, text: &str) -> ChatEvent {
    ChatEvent::Part { turn, part: StreamPart::TextDelta { id: None, delta: text.to_owned() } }
}

pub fn finish(turn: TurnId) -> ChatEvent {
    ChatEvent::Part { turn, part: StreamPart::Finish { message_metadata: None } }
}

/// Text of every transcript line, chat messages included, in render order.
pub fn transcript_text(app: &mut App) -> Vec<String> {
    olumbe_terminal::ui::transcript_lines(&app.terminal.items(olumbe_terminal::chat::now_millis()), 0)
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn render_frame_to_string(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("create test terminal");
    terminal.draw(|f| olumbe_terminal::ui::render(f, app)).expect("draw frame");

    let mut out = String::new();
    let buffer = terminal.backend().buffer();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
