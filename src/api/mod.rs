// API module entry
// Parametrized portal routing: one handler set keyed by (portal, resource)

mod handlers;
pub mod response;
pub mod types;

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::logger;
use crate::logger::AccessLogEntry;
use crate::portal::Portal;
use response::{
    apply_cors, bad_request, build_options_response, method_not_allowed, not_found,
    payload_too_large,
};

/// Main entry point for HTTP request handling
///
/// Collects the request body, dispatches to the portal handlers, applies
/// CORS headers and writes the access log line.
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().as_str().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.referer = header_str(&req, "referer");
    entry.user_agent = header_str(&req, "user-agent");

    let mut response = process_request(req, &state).await;

    if state.config.http.enable_cors {
        apply_cors(&mut response);
    }

    if state.cached_access_log.load(Ordering::Relaxed) {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the envelope (method, body size), read the body, dispatch
async fn process_request(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    if req.method() == Method::OPTIONS {
        return build_options_response(state.config.http.enable_cors);
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    if state.config.logging.show_headers {
        logger::log_headers_count(req.headers().len());
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return bad_request("Failed to read request body");
        }
    };

    dispatch(&method, &path, &body, state)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route a request to its portal resource handler.
///
/// Every portal shares the same handler set; which stores exist for the
/// portal decides which routes exist (the student portal has no
/// announcement or message routes at all).
pub fn dispatch(method: &Method, path: &str, body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/") => return handlers::handle_index(&state.config.http.server_name),
        (&Method::GET, "/healthz") => return handlers::handle_health(),
        _ => {}
    }

    let Some((portal, tail)) = split_portal_route(path) else {
        return not_found();
    };
    let stores = state.portals.get(portal);

    match tail {
        "events" => match *method {
            Method::GET => handlers::handle_list(&stores.events, "events"),
            _ => method_not_allowed("GET"),
        },
        "event" => match *method {
            Method::POST => handlers::handle_append(&stores.events, "event", body),
            _ => method_not_allowed("POST"),
        },
        "reports" => match *method {
            Method::GET => handlers::handle_list(&stores.reports, "reports"),
            _ => method_not_allowed("GET"),
        },
        "report" => match *method {
            Method::POST => handlers::handle_append(&stores.reports, "report", body),
            _ => method_not_allowed("POST"),
        },
        "notifications" => match *method {
            Method::GET => handlers::handle_list(&stores.notifications, "notifications"),
            _ => method_not_allowed("GET"),
        },
        "chat" => match *method {
            Method::POST => handlers::handle_chat(&stores.chat_history, body),
            _ => method_not_allowed("POST"),
        },
        "chat/history" => match *method {
            Method::GET => handlers::handle_list(&stores.chat_history, "history"),
            _ => method_not_allowed("GET"),
        },
        "announcement" => match &stores.announcements {
            Some(store) => match *method {
                Method::POST => handlers::handle_append(store, "announcement", body),
                _ => method_not_allowed("POST"),
            },
            None => not_found(),
        },
        "announcements" => match &stores.announcements {
            Some(store) => match *method {
                Method::GET => handlers::handle_list(store, "announcements"),
                _ => method_not_allowed("GET"),
            },
            None => not_found(),
        },
        "message" => match &stores.messages {
            Some(store) => match *method {
                Method::POST => handlers::handle_append(store, "message", body),
                _ => method_not_allowed("POST"),
            },
            None => not_found(),
        },
        "messages" => match &stores.messages {
            Some(store) => match *method {
                Method::GET => handlers::handle_list(store, "messages"),
                _ => method_not_allowed("GET"),
            },
            None => not_found(),
        },
        _ => not_found(),
    }
}

/// Split `/{portal}/{resource...}` into the portal and the resource tail
fn split_portal_route(path: &str) -> Option<(Portal, &str)> {
    let trimmed = path.strip_prefix('/')?;
    let (head, tail) = trimmed.split_once('/')?;
    let portal = Portal::from_segment(head)?;
    if tail.is_empty() {
        return None;
    }
    Some((portal, tail))
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn header_str(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
