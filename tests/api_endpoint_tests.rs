//! API endpoint tests
//!
//! These drive the full router, including the error handling layer, and
//! check the JSON error bodies clients actually receive.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_error_responder::api::middleware::ErrorHandlingConfig;
use api_error_responder::api::{create_router, AppState};
use api_error_responder::infrastructure::Claims;
use api_error_responder::Mode;

const SECRET: &str = "integration-test-secret";

fn app(mode: Mode) -> Router {
    create_router(
        AppState::new(Some(SECRET)),
        ErrorHandlingConfig::default().with_mode(mode),
    )
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(data) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&data).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn token(secret: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "user-42".to_string(),
        exp: (now + exp_offset_secs) as u64,
        iat: (now - 7200) as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Helper to extract JSON response
async fn extract_json_response(response: axum::response::Response) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn api_test_health_endpoint() {
    let response = app(Mode::Production)
        .oneshot(request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json_response(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn api_test_malformed_id_is_cast_error() {
    let response = app(Mode::Production)
        .oneshot(request(Method::GET, "/v1/accounts/abc", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json_response(response).await,
        json!({"status": "fail", "message": "Invalid id: abc"})
    );
}

#[tokio::test]
async fn api_test_unknown_account_is_not_found() {
    let uri = format!("/v1/accounts/{}", uuid::Uuid::new_v4());
    let response = app(Mode::Production)
        .oneshot(request(Method::GET, &uri, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        extract_json_response(response).await,
        json!({"status": "fail", "message": "No account found with that ID"})
    );
}

#[tokio::test]
async fn api_test_account_lifecycle() {
    let app = app(Mode::Production);

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/accounts",
            Some(json!({"name": "Ada", "email": "ada@example.com"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = extract_json_response(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(Method::GET, &format!("/v1/accounts/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json_response(response).await["name"], "Ada");

    let response = app
        .oneshot(request(
            Method::POST,
            "/v1/accounts",
            Some(json!({"name": "Ada again", "email": "ADA@example.com"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = extract_json_response(response).await;
    assert_eq!(json["status"], "fail");
    assert_eq!(
        json["message"],
        "Duplicate field value: ada@example.com. Please use another value"
    );
}

#[tokio::test]
async fn api_test_validation_messages_are_joined() {
    let response = app(Mode::Production)
        .oneshot(request(
            Method::POST,
            "/v1/accounts",
            Some(json!({"name": "", "email": "not-an-email"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json_response(response).await,
        json!({
            "status": "fail",
            "message": "Please provide a valid email. An account must have a name"
        })
    );
}

#[tokio::test]
async fn api_test_malformed_json_is_rendered_as_json() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/v1/accounts")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app(Mode::Production).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = extract_json_response(response).await;
    assert_eq!(json["status"], "fail");
    assert!(json["message"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn api_test_oversized_body_is_rejected() {
    let big_name = "a".repeat(32 * 1024);
    let response = app(Mode::Production)
        .oneshot(request(
            Method::POST,
            "/v1/accounts",
            Some(json!({"name": big_name, "email": "big@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(extract_json_response(response).await["status"], "fail");
}

#[tokio::test]
async fn api_test_session_requires_token() {
    let response = app(Mode::Production)
        .oneshot(request(Method::GET, "/v1/session", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        extract_json_response(response).await,
        json!({
            "status": "fail",
            "message": "You are not logged in! Please log in to get access."
        })
    );
}

#[tokio::test]
async fn api_test_session_with_valid_token() {
    let response = app(Mode::Production)
        .oneshot(bearer_request("/v1/session", &token(SECRET, 3600)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json_response(response).await["sub"], "user-42");
}

#[tokio::test]
async fn api_test_expired_token() {
    let response = app(Mode::Production)
        .oneshot(bearer_request("/v1/session", &token(SECRET, -3600)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json_response(response).await,
        json!({"status": "fail", "message": "Token has expired. Please login again"})
    );
}

#[tokio::test]
async fn api_test_tampered_token() {
    let response = app(Mode::Production)
        .oneshot(bearer_request("/v1/session", &token("someone-elses-secret", 3600)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json_response(response).await,
        json!({
            "status": "fail",
            "message": "Incorrect token please recheck or regenerate the token"
        })
    );
}

#[tokio::test]
async fn api_test_missing_secret_leaks_internal_error() {
    let app = create_router(
        AppState::new(None),
        ErrorHandlingConfig::default().with_mode(Mode::Production),
    );
    let response = app
        .oneshot(bearer_request("/v1/session", &token(SECRET, 3600)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = extract_json_response(response).await;
    assert!(json.get("message").is_none());
    assert_eq!(json["err"]["message"], "JWT_SECRET is not configured");
    assert_eq!(json["err"]["isOperational"], false);
}

#[tokio::test]
async fn api_test_unmatched_route() {
    let response = app(Mode::Production)
        .oneshot(request(Method::GET, "/v2/nothing-here", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        extract_json_response(response).await,
        json!({"status": "fail", "message": "Can't find /v2/nothing-here on this server"})
    );
}

#[tokio::test]
async fn api_test_development_mode_is_verbose() {
    let response = app(Mode::Development)
        .oneshot(request(Method::GET, "/v1/accounts/abc", None))
        .await
        .unwrap();

    // No classification in development: defaults only
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = extract_json_response(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["name"], "CastError");
    assert_eq!(json["error"]["path"], "id");
    assert_eq!(json["error"]["value"], "abc");
    assert!(json.as_object().unwrap().contains_key("stack"));
}
