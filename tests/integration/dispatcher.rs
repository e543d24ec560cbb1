// =====
// Command dispatch through the App: echo, help, clear, navigation and chat hand-off.
// =====

use olumbe_terminal::app::{Location, Navigator, Outcome};
use olumbe_terminal::chat::{Role, SessionStatus};
use pretty_assertions::assert_eq;

use crate::helpers::{delta, recording_app, submit, test_app, transcript_text};

#[test]
fn chat_text_is_forwarded_once_without_echo() {
    let (mut app, transport) = recording_app(Location::Home);
    let outcome = submit(&mut app, "  what do you build?  ");

    assert!(matches!(outcome, Outcome::Sent(_)));
    assert!(app.terminal.transcript.is_empty());
    assert_eq!(transport.request_count(), 1);
    let request = &transport.requests()[0];
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, Role::User);
    assert_eq!(request.messages[0].text(), "what do you build?");
    assert!(app.input.is_empty());
}

#[test]
fn command_is_echoed_exactly_once_before_its_output() {
    let mut app = test_app();
    submit(&mut app, "/help");
    let echoes = app
        .terminal
        .transcript
        .lines()
        .iter()
        .filter(|l| l.text == "guest@olumbe: /help")
        .count();
    assert_eq!(echoes, 1);
    assert_eq!(app.terminal.transcript.lines()[0].text, "guest@olumbe: /help");
}

#[test]
fn help_lists_one_line_per_available_command() {
    let mut app = test_app();
    submit(&mut app, "/about");
    assert_eq!(app.location(), &Location::About);

    submit(&mut app, "/help");
    assert_eq!(
        transcript_text(&mut app),
        vec![
            "guest@olumbe: /help",
            "Available commands:",
            "  /help   - Show this help",
            "  /clear  - Clear the terminal",
            "  /docs   - Go to docs",
            "  /home   - Go home",
            "  /map    - Go to map",
        ]
    );
}

#[test]
fn home_is_absent_from_help_at_home() {
    let mut app = test_app();
    submit(&mut app, "/help");
    assert!(!transcript_text(&mut app).iter().any(|l| l.contains("/home")));
}

#[test]
fn unknown_command_leaves_state_alone() {
    let (mut app, transport) = recording_app(Location::Map);
    assert_eq!(submit(&mut app, "/rm -rf"), Outcome::Unknown);
    assert_eq!(
        transcript_text(&mut app),
        vec!["guest@olumbe: /rm -rf", "Unknown command: /rm -rf. Type /help."]
    );
    assert_eq!(app.location(), &Location::Map);
    assert_eq!(transport.request_count(), 0);
    assert_eq!(app.terminal.session.status(), SessionStatus::Idle);
}

#[test]
fn clear_mid_stream_empties_transcript_and_goes_idle() {
    let (mut app, transport) = recording_app(Location::Home);
    submit(&mut app, "/help");
    let Outcome::Sent(turn) = submit(&mut app, "tell me a story") else {
        panic!("expected chat send");
    };
    app.handle_chat_event(delta(turn, "Once upon"));
    assert_eq!(app.terminal.session.status(), SessionStatus::Streaming);

    assert_eq!(submit(&mut app, "/clear"), Outcome::Cleared);
    assert!(transcript_text(&mut app).is_empty());
    assert_eq!(app.terminal.session.status(), SessionStatus::Idle);
    assert!(app.terminal.timestamps.is_empty());
    assert!(transport.requests()[0].cancel.is_cancelled());

    // The cancelled stream can no longer write into the cleared transcript.
    app.handle_chat_event(delta(turn, " a time"));
    assert!(transcript_text(&mut app).is_empty());
}

#[test]
fn navigation_switches_page_then_clears() {
    let mut app = test_app();
    submit(&mut app, "/help");
    assert_eq!(submit(&mut app, "/DOCS"), Outcome::Navigated(Location::Docs));
    assert_eq!(app.router.current(), &Location::Docs);
    assert!(app.terminal.transcript.is_empty());
}

#[test]
fn docs_command_is_unknown_on_a_document_page() {
    let mut app = test_app();
    app.go_to(Location::Docs);
    app.create_document();
    app.open_selected_document();
    assert!(matches!(app.location(), Location::Document(_)));

    assert_eq!(submit(&mut app, "/docs"), Outcome::Unknown);
    assert!(matches!(app.location(), Location::Document(_)));
}

#[test]
fn tab_completion_uses_first_filtered_command() {
    let mut app = test_app();
    app.input.set_text("/a");
    assert!(app.complete_command());
    assert_eq!(app.input.text(), "/about");

    app.input.set_text("/zzz");
    assert!(!app.complete_command());
    assert_eq!(app.input.text(), "/zzz");
}
