use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use log::{error, warn};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::core::{DialogueError, Message};
use crate::features::{DialogueOrchestrator, SessionId};

const INDEX_HTML: &str = include_str!("../../static/index.html");

impl IntoResponse for DialogueError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure of a JSON endpoint, always answered with an `{"error": ...}` body
#[derive(Debug)]
pub enum ApiError {
    Dialogue(DialogueError),
    Body(JsonRejection),
}

impl From<DialogueError> for ApiError {
    fn from(e: DialogueError) -> Self {
        Self::Dialogue(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Dialogue(e) => e.into_response(),
            Self::Body(rejection) => (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response(),
        }
    }
}

/// A request without a JSON content type counts as an empty body
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::Body(rejection))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub topic: Option<String>,
    pub model_a: Option<String>,
    pub model_b: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    pub session_id: Option<String>,
}

/// Unparsable ids are treated like unknown ones
fn parse_session_id(raw: Option<&str>) -> Result<SessionId, DialogueError> {
    raw.and_then(|s| s.trim().parse().ok())
        .ok_or(DialogueError::NoActiveDialogue)
}

fn require_model(seat: &str, model: Option<String>, fallback: &str) -> Result<String, DialogueError> {
    match model {
        Some(m) if m.trim().is_empty() => Err(DialogueError::InvalidParticipant(format!(
            "{seat} must not be empty"
        ))),
        Some(m) => Ok(m),
        None => Ok(fallback.to_string()),
    }
}

/// GET /: front-end page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /start: create a dialogue and return its seeded history.
pub async fn start(
    State(state): State<AppState>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let req = body_or_default(body)?;
    let config = &state.config;

    let topic = req
        .topic
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| config.default_topic.clone());
    let model_a = require_model("model_a", req.model_a, &config.participant_a.model)?;
    let model_b = require_model("model_b", req.model_b, &config.participant_b.model)?;

    let dialogue = DialogueOrchestrator::from_factory(
        &topic,
        &config.participant_a.with_model(model_a),
        &config.participant_b.with_model(model_b),
        state.backends.as_ref(),
    )?;
    let history = dialogue.history().to_vec();
    let session_id = state.sessions.start(dialogue);

    Ok(Json(json!({
        "status": "started",
        "session_id": session_id,
        "history": history,
    })))
}

/// POST /next: run one turn; the new message is the whole body.
pub async fn next(
    State(state): State<AppState>,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let req = body_or_default(body)?;
    let id = parse_session_id(req.session_id.as_deref()).inspect_err(|_| {
        warn!("Rejected turn request without a live session");
    })?;

    let result = state.sessions.advance(&id).await;
    match result {
        Ok(message) => Ok(Json(message)),
        Err(e) => {
            if !e.is_client_error() {
                error!("Turn failed for session {id}: {e}");
            }
            Err(e.into())
        }
    }
}

/// POST /reset: drop a session if it exists.
///
/// Always succeeds; an unreadable body names no session.
pub async fn reset(
    State(state): State<AppState>,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Json<serde_json::Value> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    if let Ok(id) = parse_session_id(req.session_id.as_deref()) {
        state.sessions.reset(&id);
    }
    Json(json!({ "status": "reset" }))
}

/// GET /history/{session_id}: shared transcript snapshot.
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, DialogueError> {
    let id = parse_session_id(Some(&session_id))?;
    let history = state.sessions.history(&id).await?;
    Ok(Json(json!({ "session_id": id, "history": history })))
}

/// GET /health: liveness check.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "sessions": state.sessions.len() }))
}

#[cfg(test)]
mod tests {
    use super::super::build_router;
    use super::*;
    use crate::core::Config;
    use crate::core::ParticipantConfig;
    use crate::features::participants::client::test_backends::{EchoBackend, FailingBackend};
    use crate::features::{BackendFactory, ChatBackend};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::Router;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct EchoFactory;

    impl BackendFactory for EchoFactory {
        fn backend(&self, _participant: &ParticipantConfig) -> Arc<dyn ChatBackend> {
            Arc::new(EchoBackend)
        }
    }

    struct FailingFactory;

    impl BackendFactory for FailingFactory {
        fn backend(&self, _participant: &ParticipantConfig) -> Arc<dyn ChatBackend> {
            Arc::new(FailingBackend("401 Unauthorized"))
        }
    }

    fn test_app(factory: Arc<dyn BackendFactory>) -> Router {
        let config = Config::from_lookup(|key| match key {
            "MODEL_A_NAME" => Some("model-a".to_string()),
            "MODEL_B_NAME" => Some("model-b".to_string()),
            _ => None,
        })
        .expect("config");
        build_router(AppState::new(config, factory))
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.expect("response");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_full_scenario() {
        let app = test_app(Arc::new(EchoFactory));

        let (status, started) =
            send(&app, json_post("/start", json!({"topic": "quantum computing"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["status"], "started");
        let history = started["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["speaker"], "Moderator");
        assert!(history[0]["text"].as_str().unwrap().contains("quantum computing"));
        let session_id = started["session_id"].as_str().unwrap().to_string();

        let (status, first) =
            send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["speaker"], "Model A");
        assert_eq!(first["model"], "model-a");

        let (_, second) = send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        assert_eq!(second["speaker"], "Model B");
        assert_eq!(second["model"], "model-b");

        let (status, reset) =
            send(&app, json_post("/reset", json!({"session_id": session_id}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reset, json!({"status": "reset"}));

        let (status, err) = send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err, json!({"error": "No conversation started"}));
    }

    #[tokio::test]
    async fn test_next_without_body_is_client_error() {
        let app = test_app(Arc::new(EchoFactory));
        let req = Request::builder()
            .method("POST")
            .uri("/api/next")
            .body(Body::empty())
            .unwrap();

        let (status, err) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "No conversation started");
    }

    #[tokio::test]
    async fn test_start_without_body_uses_defaults() {
        let app = test_app(Arc::new(EchoFactory));
        let req = Request::builder()
            .method("POST")
            .uri("/api/start")
            .body(Body::empty())
            .unwrap();

        let (status, started) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let text = started["history"][0]["text"].as_str().unwrap();
        assert!(text.contains("The future of AI"));
    }

    #[tokio::test]
    async fn test_model_override_and_empty_model() {
        let app = test_app(Arc::new(EchoFactory));

        let (_, started) =
            send(&app, json_post("/start", json!({"topic": "tea", "model_b": "llama3"}))).await;
        let session_id = started["session_id"].as_str().unwrap().to_string();
        send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        let (_, second) = send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        assert_eq!(second["model"], "llama3");

        let (status, err) = send(&app, json_post("/start", json!({"model_a": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("model_a"));
    }

    #[tokio::test]
    async fn test_remote_failure_is_a_normal_turn() {
        let app = test_app(Arc::new(FailingFactory));

        let (_, started) = send(&app, json_post("/start", json!({"topic": "tea"}))).await;
        let session_id = started["session_id"].as_str().unwrap().to_string();

        let (status, msg) = send(&app, json_post("/next", json!({"session_id": session_id}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(msg["speaker"], "Model A");
        assert_eq!(
            msg["text"],
            "Error communicating with model-a: 401 Unauthorized"
        );
    }

    #[tokio::test]
    async fn test_history_and_health() {
        let app = test_app(Arc::new(EchoFactory));

        let (_, started) = send(&app, json_post("/start", json!({"topic": "tea"}))).await;
        let session_id = started["session_id"].as_str().unwrap().to_string();
        send(&app, json_post("/next", json!({"session_id": session_id}))).await;

        let req = Request::builder()
            .uri(format!("/history/{session_id}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["history"].as_array().unwrap().len(), 2);

        let req = Request::builder().uri("/history/not-a-uuid").body(Body::empty()).unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "sessions": 1}));
    }

    #[tokio::test]
    async fn test_reset_is_unconditional() {
        let app = test_app(Arc::new(EchoFactory));
        let (status, body) = send(&app, json_post("/reset", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "reset");
    }

    fn raw_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request")
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = test_app(Arc::new(EchoFactory));

        for uri in ["/next", "/start", "/api/next"] {
            let (status, err) = send(&app, raw_post(uri, "not json")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(err["error"].as_str().is_some_and(|e| !e.is_empty()), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_is_json_error() {
        let app = test_app(Arc::new(EchoFactory));

        let (status, err) = send(&app, json_post("/next", json!({"session_id": 5}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err["error"].is_string());

        let (status, err) = send(&app, json_post("/start", json!({"topic": 5}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err["error"].is_string());

        // nothing was started by the rejected request
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (_, body) = send(&app, req).await;
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_reset_ignores_malformed_body() {
        let app = test_app(Arc::new(EchoFactory));
        let (status, body) = send(&app, raw_post("/reset", "not json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "reset"}));
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = test_app(Arc::new(EchoFactory));
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
