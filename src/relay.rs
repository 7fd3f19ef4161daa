//! `serve` mode: a `/chat` endpoint backed by the Gemini `generateContent` API.

use crate::{
    config::{validate_relay, RelayConfig},
    constants::{
        EMPTY_MESSAGE_ERROR, RELAY_EMPTY_TEXT, RELAY_NO_CANDIDATE, RELAY_NO_TEXT,
        RELAY_PROCESSING_ERROR,
    },
    errors::{MurmurError, MurmurResult},
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct RelayState {
    client: Client,
    api_url: String,
    api_key: String,
}

impl RelayState {
    pub fn new(config: &RelayConfig) -> MurmurResult<Self> {
        validate_relay(config)?;
        Ok(Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug)]
pub enum RelayError {
    EmptyMessage,
    Upstream(String),
    Unexpected(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RelayError::EmptyMessage => (StatusCode::BAD_REQUEST, EMPTY_MESSAGE_ERROR.to_string()),
            RelayError::Upstream(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("HTTP error: {}", e))
            }
            RelayError::Unexpected(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unexpected error: {}", e),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(bind: &str, state: RelayState) -> MurmurResult<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| MurmurError::config_error(format!("Invalid bind address '{}': {}", bind, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| MurmurError::relay_error(e.to_string()))
}

async fn index() -> &'static str {
    "murmur relay: POST {\"message\": \"...\"} to /chat\n"
}

async fn chat(State(state): State<RelayState>, body: Bytes) -> Result<Json<Value>, RelayError> {
    let data: Value =
        serde_json::from_slice(&body).map_err(|e| RelayError::Unexpected(e.to_string()))?;
    let request = data
        .as_object()
        .ok_or_else(|| RelayError::Unexpected("request body must be a JSON object".to_string()))?;
    let user_input = match request.get("message") {
        None => "",
        Some(Value::String(message)) => message.trim(),
        Some(_) => {
            return Err(RelayError::Unexpected("message must be a string".to_string()));
        }
    };

    if user_input.is_empty() {
        return Err(RelayError::EmptyMessage);
    }

    let payload = json!({ "contents": [{ "parts": [{ "text": user_input }] }] });

    let response = state
        .client
        .post(&state.api_url)
        .query(&[("key", &state.api_key)])
        .json(&payload)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            error!("Upstream request failed: {}", e);
            RelayError::Upstream(e.without_url().to_string())
        })?;

    let api_response: Value = response.json().await.map_err(|e| {
        error!("Upstream body unreadable: {}", e);
        RelayError::Upstream(e.without_url().to_string())
    })?;

    let text = extract_response_text(&api_response);
    let text = if is_truthy(&text) {
        text
    } else {
        Value::from(RELAY_EMPTY_TEXT)
    };

    Ok(Json(json!({ "response": text })))
}

/// Pulls `candidates[0].content.parts[0].text` out of a Gemini reply.
///
/// Missing pieces give one of the fixed fallbacks; pieces of the wrong shape
/// give [`RELAY_PROCESSING_ERROR`]. A non-string `text` is passed through.
pub fn extract_response_text(api_response: &Value) -> Value {
    first_part_text(api_response).unwrap_or_else(|| {
        error!("Error extracting response: unexpected shape {}", api_response);
        Value::from(RELAY_PROCESSING_ERROR)
    })
}

fn first_part_text(api_response: &Value) -> Option<Value> {
    let no_candidate = || Some(Value::from(RELAY_NO_CANDIDATE));

    let candidates = match api_response.get("candidates") {
        Some(candidates) if is_truthy(candidates) => candidates,
        _ => return no_candidate(),
    };
    let first_candidate = match candidates {
        Value::Array(items) => items.first()?,
        // a one-character candidate can never hold "content"
        Value::String(_) => return no_candidate(),
        _ => return None,
    };
    let candidate = match first_candidate {
        Value::Object(map) => map,
        Value::Array(items) if items.contains(&Value::from("content")) => return None,
        Value::String(s) if s.contains("content") => return None,
        Value::Array(_) | Value::String(_) => return no_candidate(),
        _ => return None,
    };

    let Some(content) = candidate.get("content") else {
        return no_candidate();
    };
    let parts = match content.as_object()?.get("parts") {
        Some(parts) if is_truthy(parts) => parts,
        _ => return no_candidate(),
    };
    let part = parts.as_array()?.first()?.as_object()?;

    Some(
        part.get("text")
            .cloned()
            .unwrap_or_else(|| Value::from(RELAY_NO_TEXT)),
    )
}

/// Empty containers, empty strings, zero, false and null are all "nothing".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
