//! Integration tests for the HTTP intake backend against an in-process
//! stub of the backend collaborator.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use healthe_client::HttpIntakeBackend;
use healthe_core::{CoreConfig, CreateIntake, IntakeStartReq, SubmitError};
use healthe_types::{Age, PatientName, Sex};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

fn backend(addr: SocketAddr, timeout: Duration) -> HttpIntakeBackend {
    let cfg = CoreConfig::new(format!("http://{addr}"), timeout).expect("config should build");
    HttpIntakeBackend::new(Arc::new(cfg)).expect("backend should build")
}

fn valid_request() -> IntakeStartReq {
    IntakeStartReq {
        name: PatientName::new("Ann Lee").expect("valid name"),
        age: Age::parse("30").expect("valid age"),
        sex: Sex::Male,
        accepted_terms: true,
    }
}

#[tokio::test]
async fn success_response_yields_ref_id_and_report_url() {
    let received: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let sink = received.clone();
    let app = Router::new().route(
        "/api/intake/start",
        post(move |Json(body): Json<serde_json::Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().expect("sink lock") = Some(body);
                Json(json!({
                    "ref_id": "ABCDEFGHIJ1234567890",
                    "report_pdf_url": "/api/report/ABCDEFGHIJ1234567890.pdf",
                }))
            }
        }),
    );
    let addr = serve(app).await;

    let created = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect("submission should succeed");

    assert_eq!(created.ref_id, "ABCDEFGHIJ1234567890");
    assert_eq!(
        created.report_pdf_url.as_deref(),
        Some("/api/report/ABCDEFGHIJ1234567890.pdf")
    );

    let body = received
        .lock()
        .expect("sink lock")
        .take()
        .expect("stub should have received a body");
    assert_eq!(
        body,
        json!({
            "name": "Ann Lee",
            "age": 30,
            "sex": "Male",
            "acceptedTerms": true,
        })
    );
}

#[tokio::test]
async fn success_response_without_ref_id_is_an_application_error() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async { Json(json!({ "report_pdf_url": "/api/report/x.pdf" })) }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("missing ref_id should fail");
    assert_eq!(err, SubmitError::MissingRefId);
}

#[tokio::test]
async fn success_response_with_unparseable_body_is_an_application_error() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async { (StatusCode::OK, "not json at all") }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("unparseable success body should fail");
    assert_eq!(err, SubmitError::MissingRefId);
}

#[tokio::test]
async fn failure_response_surfaces_detail_field() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "duplicate submission" })),
            )
        }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("400 should fail");
    assert_eq!(err, SubmitError::Rejected("duplicate submission".into()));
}

#[tokio::test]
async fn failure_response_falls_back_to_message_field() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "intake storage unavailable" })),
            )
        }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("500 should fail");
    assert_eq!(err, SubmitError::Rejected("intake storage unavailable".into()));
}

#[tokio::test]
async fn failure_response_with_unparseable_body_embeds_status_code() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "<html>downstream</html>") }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("503 should fail");
    assert_eq!(
        err,
        SubmitError::Rejected("The server responded with status 503.".into())
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind to grab a free port, then drop the listener so connecting fails.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = backend(addr, Duration::from_secs(5))
        .create_intake(valid_request())
        .await
        .expect_err("connection refused should fail");
    assert!(matches!(err, SubmitError::Transport(_)));
}

#[tokio::test]
async fn hung_backend_resolves_to_a_transport_error() {
    let app = Router::new().route(
        "/api/intake/start",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "ref_id": "ABCDEFGHIJ1234567890" }))
        }),
    );
    let addr = serve(app).await;

    let err = backend(addr, Duration::from_millis(200))
        .create_intake(valid_request())
        .await
        .expect_err("request should time out");
    assert!(matches!(err, SubmitError::Transport(_)));
}
