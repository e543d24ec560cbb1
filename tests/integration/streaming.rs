// =====
// Chat stream events applied through the App: ordering, pending row, stop, failures.
// =====

use olumbe_terminal::app::{Location, Outcome, TranscriptItem};
use olumbe_terminal::chat::{ChatEvent, SessionStatus, TurnId};
use pretty_assertions::assert_eq;

use crate::helpers::{delta, finish, recording_app, start, submit, transcript_text};

fn send(app: &mut olumbe_terminal::app::App, text: &str) -> TurnId {
    match submit(app, text) {
        Outcome::Sent(turn) => turn,
        other => panic!("expected chat send, got {other:?}"),
    }
}

#[test]
fn full_turn_renders_question_then_answer() {
    let (mut app, _) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");
    app.handle_chat_event(start(turn, "a-1", None));
    app.handle_chat_event(delta(turn, "hello"));
    app.handle_chat_event(delta(turn, " there"));
    app.handle_chat_event(finish(turn));

    assert_eq!(app.terminal.session.status(), SessionStatus::Idle);
    assert_eq!(transcript_text(&mut app), vec!["guest@olumbe: hi", "vivek@olumbe: hello there"]);
}

#[test]
fn assistant_id_is_stamped_when_first_observed() {
    let (mut app, _) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");
    app.handle_chat_event(start(turn, "a-1", None));
    let first_seen = app.terminal.timestamps.get("a-1").expect("stamped on start");

    app.handle_chat_event(delta(turn, "x"));
    assert_eq!(app.terminal.timestamps.get("a-1"), Some(first_seen));
}

#[test]
fn pending_row_until_first_visible_text() {
    let (mut app, _) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");

    let now = olumbe_terminal::chat::now_millis();
    assert!(matches!(app.terminal.items(now).last(), Some(TranscriptItem::Pending { .. })));

    app.handle_chat_event(start(turn, "a-1", None));
    assert!(matches!(app.terminal.items(now).last(), Some(TranscriptItem::Pending { .. })));

    app.handle_chat_event(delta(turn, "h"));
    assert!(!app.terminal.items(now).iter().any(|i| matches!(i, TranscriptItem::Pending { .. })));
}

#[test]
fn stop_keeps_partial_answer_and_drops_late_chunks() {
    let (mut app, transport) = recording_app(Location::Home);
    let turn = send(&mut app, "count to three");
    app.handle_chat_event(delta(turn, "one, two"));
    app.stop_stream();

    assert_eq!(app.terminal.session.status(), SessionStatus::Idle);
    assert!(transport.requests()[0].cancel.is_cancelled());

    app.handle_chat_event(delta(turn, ", three"));
    app.handle_chat_event(finish(turn));
    assert_eq!(
        transcript_text(&mut app),
        vec!["guest@olumbe: count to three", "vivek@olumbe: one, two"]
    );
}

#[test]
fn failure_sets_error_and_next_send_recovers() {
    let (mut app, transport) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");
    app.handle_chat_event(delta(turn, "par"));
    app.handle_chat_event(ChatEvent::Failed { turn, message: "503 Service Unavailable".to_owned() });

    assert_eq!(app.terminal.session.status(), SessionStatus::Error);
    assert_eq!(app.terminal.session.last_error(), Some("503 Service Unavailable"));
    assert!(transcript_text(&mut app).contains(&"vivek@olumbe: par".to_owned()));

    send(&mut app, "again");
    assert_eq!(app.terminal.session.status(), SessionStatus::Submitted);
    assert_eq!(transport.requests()[1].messages.len(), 3);
}

#[test]
fn backend_creation_time_orders_messages_among_lines() {
    let (mut app, _) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");
    // Reply claims to predate the question; creation time decides placement.
    app.handle_chat_event(start(turn, "a-1", Some(1)));
    app.handle_chat_event(delta(turn, "early"));
    app.handle_chat_event(finish(turn));

    assert_eq!(transcript_text(&mut app), vec!["vivek@olumbe: early", "guest@olumbe: hi"]);
}

#[test]
fn command_lines_interleave_with_chat_by_time() {
    let (mut app, _) = recording_app(Location::Home);
    let turn = send(&mut app, "hi");
    app.handle_chat_event(delta(turn, "hey"));
    app.handle_chat_event(finish(turn));
    submit(&mut app, "/nope");

    assert_eq!(
        transcript_text(&mut app),
        vec![
            "guest@olumbe: hi",
            "vivek@olumbe: hey",
            "guest@olumbe: /nope",
            "Unknown command: /nope. Type /help.",
        ]
    );
}
