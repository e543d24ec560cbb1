// =====
// HTTP chat client against a wiremock SSE endpoint.
// =====

use olumbe_terminal::chat::wire::StreamPart;
use olumbe_terminal::chat::{
    ChatEvent, ChatMessage, ChatTransport, HttpChatClient, StreamRequest, TurnId,
};
use pretty_assertions::assert_eq;
use reqwest::Url;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(frames: &[&str]) -> String {
    frames.iter().map(|f| format!("data: {f}\n\n")).collect()
}

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

fn request(turn: u64, text: &str) -> StreamRequest {
    StreamRequest {
        turn: TurnId(turn),
        messages: vec![ChatMessage::user("u-1", text, 10)],
        cancel: CancellationToken::new(),
    }
}

fn client(
    server: &MockServer,
    idle_timeout: Option<Duration>,
) -> (HttpChatClient, mpsc::UnboundedReceiver<ChatEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let endpoint = Url::parse(&format!("{}/api/chat", server.uri())).expect("mock url");
    (HttpChatClient::new(endpoint, idle_timeout, tx).expect("client"), rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<ChatEvent>) -> Vec<ChatEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn streams_parts_in_order_then_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("accept", "text/event-stream"))
        .and(body_partial_json(serde_json::json!({
            "messages": [{ "role": "user", "parts": [{ "type": "text", "text": "hi" }] }]
        })))
        .respond_with(sse_response(sse(&[
            r#"{"type":"start","messageId":"a-1","messageMetadata":{"createdAt":42}}"#,
            r#"{"type":"start-step"}"#,
            r#"{"type":"text-start","id":"t"}"#,
            r#"{"type":"text-delta","id":"t","delta":"Hel"}"#,
            r#"{"type":"text-delta","id":"t","delta":"lo"}"#,
            r#"{"type":"text-end","id":"t"}"#,
            r#"{"type":"finish"}"#,
            "[DONE]",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, None);
    client.stream(request(7, "hi")).await.expect("stream ok");

    let events = drain(&mut rx);
    let turn = TurnId(7);
    let deltas: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            ChatEvent::Part { part: StreamPart::TextDelta { delta, .. }, .. } => Some(delta.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["Hel", "lo"]);
    assert!(events.iter().all(|e| e.turn() == turn));
    assert_eq!(events.last(), Some(&ChatEvent::Closed { turn }));
    assert!(matches!(
        events.first(),
        Some(ChatEvent::Part { part: StreamPart::Start { message_id: Some(id), .. }, .. }) if id == "a-1"
    ));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, None);
    let err = client.stream(request(1, "hi")).await.expect_err("500 fails");
    let message = format!("{err:#}");
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("model overloaded"), "{message}");
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn error_part_fails_the_turn_after_earlier_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse_response(sse(&[
            r#"{"type":"text-delta","id":"t","delta":"part"}"#,
            r#"{"type":"error","errorText":"quota exceeded"}"#,
        ])))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, None);
    let err = client.stream(request(2, "hi")).await.expect_err("error part");
    assert!(format!("{err:#}").contains("quota exceeded"));
    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert!(!events.iter().any(|e| matches!(e, ChatEvent::Closed { .. })));
}

#[tokio::test]
async fn eof_without_done_still_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse_response(sse(&[r#"{"type":"text-delta","delta":"x"}"#, "not json"])))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, None);
    client.stream(request(3, "hi")).await.expect("stream ok");
    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], ChatEvent::Closed { turn: TurnId(3) });
}

#[tokio::test]
async fn cancelled_request_sends_nothing_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            sse_response(sse(&["[DONE]"])).set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, None);
    let req = request(4, "hi");
    req.cancel.cancel();
    client.stream(req).await.expect("cancel is not an error");
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn transport_start_reports_failure_as_event() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let (client, mut rx) = client(&server, None);
            client.start(request(5, "hi"));
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("event before timeout")
                .expect("channel open");
            match event {
                ChatEvent::Failed { turn, message } => {
                    assert_eq!(turn, TurnId(5));
                    assert!(message.contains("404"), "{message}");
                }
                other => panic!("expected failure, got {other:?}"),
            }
        })
        .await;
}

#[tokio::test]
async fn idle_timeout_covers_the_wait_for_response_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse_response(sse(&["[DONE]"])).set_delay(Duration::from_secs(4)))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, Some(Duration::from_millis(300)));
    let started = std::time::Instant::now();
    let err = client.stream(request(8, "hi")).await.expect_err("headers never arrive in time");
    assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
    assert!(format!("{err:#}").contains("waiting for chat response"), "{err:#}");
    assert!(drain(&mut rx).is_empty());
}

/// Serve one chunked SSE response that sends `frame` and then goes silent.
async fn stalled_sse_server(frame: &'static str) -> Url {
    use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else { return };
        let mut buf = vec![0_u8; 8192];
        let mut seen = Vec::new();
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => seen.extend_from_slice(&buf[..n]),
            }
        }
        let data = format!("data: {frame}\n\n");
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n{:x}\r\n{data}\r\n",
            data.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.flush().await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    });
    Url::parse(&format!("http://{addr}/api/chat")).expect("stall url")
}

#[tokio::test]
async fn idle_timeout_fails_a_stalled_stream_after_earlier_parts() {
    let endpoint = stalled_sse_server(r#"{"type":"text-delta","id":"t","delta":"par"}"#).await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let client = HttpChatClient::new(endpoint, Some(Duration::from_millis(300)), tx).expect("client");

    let started = std::time::Instant::now();
    let err = tokio::time::timeout(Duration::from_secs(10), client.stream(request(9, "hi")))
        .await
        .expect("stream gives up before the outer guard")
        .expect_err("stalled stream fails");
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    assert!(format!("{err:#}").contains("chat stream idle"), "{err:#}");

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![ChatEvent::Part {
            turn: TurnId(9),
            part: StreamPart::TextDelta { id: Some("t".to_owned()), delta: "par".to_owned() },
        }]
    );
}

#[tokio::test]
async fn idle_timeout_leaves_prompt_streams_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse_response(sse(&[r#"{"type":"text-delta","delta":"ok"}"#, "[DONE]"])))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server, Some(Duration::from_secs(2)));
    client.stream(request(10, "hi")).await.expect("fast stream is fine");
    assert_eq!(drain(&mut rx).last(), Some(&ChatEvent::Closed { turn: TurnId(10) }));
}
