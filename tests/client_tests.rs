use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};

use contact_relay::use_cases::client::{ContactFormClient, FormInput, Outcome, Session};

/// Spawns a stub server whose /personaldata always answers with the given
/// status and body. Returns the server's origin.
fn spawn_stub(status: StatusCode, body: Value) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");

    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            "/personaldata",
            web::post().to(move || {
                let body = body.clone();
                async move { HttpResponse::build(status).json(body) }
            }),
        )
    })
    .listen(listener)
    .expect("listen stub")
    .workers(1)
    .run();

    tokio::spawn(server);
    format!("http://{}", addr)
}

fn input() -> FormInput {
    FormInput {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: Some("4045551234".into()),
        subject: "Hello".into(),
        message: "Hi there".into(),
    }
}

#[tokio::test]
async fn success_sets_session_flag_and_second_call_short_circuits() {
    let origin = spawn_stub(
        StatusCode::OK,
        json!({"success": true, "message": "Message sent successfully."}),
    );
    let client = ContactFormClient::new(&origin);
    let mut session = Session::default();

    assert_eq!(client.submit(&mut session, &input()).await, Outcome::Success);
    assert!(session.contact_sent());

    // no request is made this time; the stub could be gone and it would
    // still answer the same
    assert_eq!(
        client.submit(&mut session, &input()).await,
        Outcome::AlreadySent
    );
}

#[tokio::test]
async fn restored_session_short_circuits_without_network() {
    // unroutable endpoint: any network attempt would surface as a
    // NetworkFailure, so AlreadySent proves no request was made
    let client = ContactFormClient::new("http://127.0.0.1:1");
    let mut session = Session::default();
    session.mark_sent();

    assert_eq!(
        client.submit(&mut session, &input()).await,
        Outcome::AlreadySent
    );
}

#[tokio::test]
async fn local_validation_failure_keeps_the_flag_clear() {
    let client = ContactFormClient::new("http://127.0.0.1:1");
    let mut session = Session::default();

    let mut form = input();
    form.name = "  ".into();

    match client.submit(&mut session, &form).await {
        Outcome::ValidationFailure(msg) => assert!(msg.contains("name")),
        other => panic!("expected local validation failure, got {:?}", other),
    }
    assert!(!session.contact_sent());
}

#[tokio::test]
async fn server_reported_failure_is_surfaced_verbatim() {
    let origin = spawn_stub(
        StatusCode::BAD_REQUEST,
        json!({"success": false, "message": "Validation failed"}),
    );
    let client = ContactFormClient::new(&origin);
    let mut session = Session::default();

    assert_eq!(
        client.submit(&mut session, &input()).await,
        Outcome::ValidationFailure("Validation failed".into())
    );
    assert!(!session.contact_sent());
}

#[tokio::test]
async fn failure_without_message_falls_back_to_generic_text() {
    let origin = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"success": false}));
    let client = ContactFormClient::new(&origin);
    let mut session = Session::default();

    match client.submit(&mut session, &input()).await {
        Outcome::ValidationFailure(msg) => {
            assert_eq!(msg, "Something went wrong. Please try again later.")
        }
        other => panic!("expected fallback failure message, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_distinct_network_failure() {
    let client = ContactFormClient::new("http://127.0.0.1:1");
    let mut session = Session::default();

    match client.submit(&mut session, &input()).await {
        Outcome::NetworkFailure(msg) => assert!(msg.contains("connection")),
        other => panic!("expected network failure, got {:?}", other),
    }
    assert!(!session.contact_sent());
}
