// =====
// Full-frame rendering with ratatui's TestBackend.
// =====

use olumbe_terminal::app::{App, Location};
use olumbe_terminal::chat::ChatEvent;
use olumbe_terminal::locations::{LocationRow, StaticLocations};
use olumbe_terminal::ui::{NO_MATCH_TEXT, PLACEHOLDER};

use crate::helpers::{delta, recording_app, render_frame_to_string, submit, test_app};

#[test]
fn home_shows_prompt_placeholder_and_header() {
    let mut app = test_app();
    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("guest@olumbe:"));
    assert!(frame.contains(PLACEHOLDER));
    assert!(frame.contains("F1 home"));
    assert!(frame.contains("w "));
}

#[test]
fn help_output_is_rendered() {
    let mut app = test_app();
    submit(&mut app, "/help");
    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("Available commands:"));
    assert!(frame.contains("/clear  - Clear the terminal"));
}

#[test]
fn pending_row_shows_assistant_label() {
    let (mut app, _) = recording_app(Location::Home);
    submit(&mut app, "hello");
    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("guest@olumbe: hello"));
    assert!(frame.contains("vivek@olumbe:"));
    assert!(frame.contains("waiting"));
}

#[test]
fn streamed_text_and_error_status_render() {
    let (mut app, _) = recording_app(Location::Home);
    let olumbe_terminal::app::Outcome::Sent(turn) = submit(&mut app, "hello") else {
        panic!("expected send");
    };
    app.handle_chat_event(delta(turn, "partial answer"));
    app.handle_chat_event(ChatEvent::Failed { turn, message: "connection reset".to_owned() });

    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("vivek@olumbe: partial answer"));
    assert!(frame.contains("error: connection reset"));
}

#[test]
fn autocomplete_panel_lists_matches_and_no_match_notice() {
    let mut app = test_app();
    app.input.set_text("/cl");
    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("Available commands"));
    assert!(frame.contains("/clear - Clear the terminal"));
    assert!(!frame.contains("/docs - Go to docs"));

    app.input.set_text("/nothing");
    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains(NO_MATCH_TEXT));
    assert!(frame.contains("/docs - Go to docs"));
}

#[test]
fn about_page_keeps_terminal_below() {
    let mut app = test_app();
    submit(&mut app, "/about");
    let frame = render_frame_to_string(&mut app, 100, 32);
    assert!(frame.contains("Vivek Olumbe"));
    assert!(frame.contains("guest@olumbe:"));
}

#[test]
fn document_page_hides_terminal() {
    let mut app = test_app();
    app.go_to(Location::Docs);
    app.create_document();
    let frame = render_frame_to_string(&mut app, 100, 32);
    assert!(frame.contains("Documents"));

    app.open_selected_document();
    let frame = render_frame_to_string(&mut app, 100, 32);
    assert!(frame.contains("Title"));
    assert!(frame.contains("by anonymous"));
    assert!(!frame.contains("guest@olumbe:"));
}

#[test]
fn map_reports_point_count() {
    let rows = vec![LocationRow {
        id: "p1".to_owned(),
        timestamp: "2025-08-05T01:00:00+03:00".parse().expect("timestamp"),
        latitude: -1.2921,
        longitude: 36.8219,
        accuracy: Some(10.0),
    }];
    let mut app = test_app();
    app.location_source = Box::new(StaticLocations::new(rows));
    app.go_to(Location::Map);
    let frame = render_frame_to_string(&mut app, 120, 40);
    assert!(frame.contains("1 points"));
    assert!(frame.contains("-1.2921, 36.8219"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app: App = test_app();
    submit(&mut app, "/help");
    let _ = render_frame_to_string(&mut app, 10, 3);
    app.go_to(Location::Map);
    let _ = render_frame_to_string(&mut app, 5, 2);
}
