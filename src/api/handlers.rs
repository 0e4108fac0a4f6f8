// Portal resource handlers module
//
// One parametrized handler pair (list/append) serves every portal and
// resource kind; the chat endpoint adds its echo on top of the append.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::response::{bad_request, json_response};
use super::types::{ChatExchange, ChatMessage};
use crate::logger;
use crate::portal::Portal;
use crate::store::Store;

/// GET handler: the full store snapshot wrapped under its plural key
pub fn handle_list<T>(store: &Store<T>, key: &str) -> Response<Full<Bytes>>
where
    T: Serialize + Clone,
{
    let records = serde_json::to_value(store.list()).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize {key}: {e}"));
        Value::Array(Vec::new())
    });

    let mut body = Map::new();
    body.insert(key.to_string(), records);
    json_response(StatusCode::OK, &body)
}

/// POST handler: validate the payload shape, append, echo the stored record.
///
/// A schema mismatch (missing or mistyped field) is reported as a 400 naming
/// the offending field and leaves the store unchanged.
pub fn handle_append<T>(store: &Store<T>, key: &str, body: &[u8]) -> Response<Full<Bytes>>
where
    T: DeserializeOwned + Serialize + Clone,
{
    let record: T = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return bad_request(&format!("Invalid {key} payload: {e}")),
    };

    let stored = store.append(record);
    let value = serde_json::to_value(&stored).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize stored {key}: {e}"));
        Value::Null
    });

    let mut envelope = Map::new();
    envelope.insert("status".to_string(), Value::String("success".to_string()));
    envelope.insert(key.to_string(), value);
    json_response(StatusCode::OK, &envelope)
}

/// Chat handler: append the exchange to the portal's history and return the
/// echo. The response is a fixed template derived solely from the input
/// message; no model is called.
pub fn handle_chat(history: &Store<ChatExchange>, body: &[u8]) -> Response<Full<Bytes>> {
    let msg: ChatMessage = match serde_json::from_slice(body) {
        Ok(m) => m,
        Err(e) => return bad_request(&format!("Invalid chat payload: {e}")),
    };

    let reply = format!("AI: You said '{}'", msg.message);
    history.append(ChatExchange {
        user: msg.user,
        message: msg.message,
        response: reply.clone(),
    });

    json_response(StatusCode::OK, &serde_json::json!({ "response": reply }))
}

/// Service index served at `/`
pub fn handle_index(server_name: &str) -> Response<Full<Bytes>> {
    let portals: Vec<&str> = Portal::ALL.iter().map(|p| p.as_str()).collect();
    let body = serde_json::json!({
        "service": server_name,
        "portals": portals,
        "resources": [
            "events",
            "reports",
            "notifications",
            "chat",
            "announcements",
            "messages"
        ],
    });
    json_response(StatusCode::OK, &body)
}

/// Liveness probe
pub fn handle_health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}
