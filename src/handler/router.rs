//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, middleware
//! chain dispatch, and exact path/method branches. Every request is answered
//! by exactly one branch, and the response value is finalized exactly once.

use crate::config::AppState;
use crate::handler::pages;
use crate::http::{self, form, response::build_html_response};
use crate::logger::{self, AccessLogEntry};
use crate::middleware::RequestInfo;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let mut response = dispatch(req, &state, &method, &path).await;

    if let Ok(server_name) = state.config.http.server_name.parse() {
        response.headers_mut().insert("Server", server_name);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route the request: method gate, declared body-size gate, middleware
/// chain, then exact path/method branches with a single default.
async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    method: &Method,
    path: &str,
) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Check declared body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Middleware chain runs first; a finalized response ends the request
    let info = RequestInfo { method, path };
    if let Some(resp) = state.chain.dispatch(&info) {
        return resp;
    }

    // 4. Exact path/method branches, single default
    match (method, path) {
        (&Method::GET | &Method::HEAD, "/") => build_html_response(pages::form_page(), is_head),
        (&Method::POST, "/message") => match read_body(req).await {
            Ok(body) => submit_message(&body, state).await,
            Err(resp) => resp,
        },
        (&Method::POST, "/create-user") => match read_body(req).await {
            Ok(body) => create_user(&body),
            Err(resp) => resp,
        },
        _ => build_html_response(pages::default_page(), is_head),
    }
}

/// Gate HTTP methods: GET/HEAD/POST are dispatched, OPTIONS is answered,
/// anything else is rejected
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD | &Method::POST => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate the declared Content-Length against the configured maximum
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
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

/// Accumulate all body chunks into one contiguous buffer
async fn read_body(
    req: Request<hyper::body::Incoming>,
) -> Result<Bytes, Response<Full<Bytes>>> {
    match req.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response("Failed to read request body"))
        }
    }
}

/// Decode the posted form and persist the message, redirecting home on
/// success. A write failure is surfaced as 500 rather than a redirect.
async fn submit_message(body: &[u8], state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let params = form::parse(body);
    let Some(message) = params.get("message") else {
        logger::log_warning("POST /message without a message field");
        return http::build_400_response("Missing message field");
    };

    match state.store.write(message).await {
        Ok(()) => {
            logger::log_message_written(message.len());
            http::build_redirect_response("/")
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to write {}: {e}",
                state.store.path().display()
            ));
            http::build_500_response()
        }
    }
}

/// Decode the posted form and confirm the submitted user name
fn create_user(body: &[u8]) -> Response<Full<Bytes>> {
    let params = form::parse(body);
    let username = params
        .get("username")
        .map(String::as_str)
        .unwrap_or_default();
    build_html_response(pages::user_created_page(username), false)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Map the request version onto the access-log label
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn body_size(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    };
    use crate::middleware::Chain;

    fn test_state(tag: &str) -> Arc<AppState> {
        let mut path = std::env::temp_dir();
        path.push(format!("formlet-router-{}-{tag}.txt", std::process::id()));
        test_state_with_file(path.to_string_lossy().into_owned())
    }

    fn test_state_with_file(message_file: String) -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                show_headers: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "test".to_string(),
                enable_cors: false,
                max_body_size: 1024,
            },
            app: AppConfig {
                message_file,
                users: vec![],
            },
        };
        Arc::new(AppState::new(config, Chain::new()))
    }

    async fn body_text(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_submit_message_writes_file_and_redirects() {
        let state = test_state("submit");
        let resp = submit_message(b"message=hello%20world&second=x", &state).await;

        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers().get("Location").unwrap(), "/");
        assert_eq!(state.store.read().await.unwrap(), "hello world");

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_submit_message_overwrites_previous() {
        let state = test_state("overwrite");
        submit_message(b"message=first", &state).await;
        submit_message(b"message=second", &state).await;

        assert_eq!(state.store.read().await.unwrap(), "second");

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_submit_message_missing_field_is_400() {
        let state = test_state("missing");
        let resp = submit_message(b"second=x", &state).await;
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_submit_message_write_failure_is_500() {
        let mut dir = std::env::temp_dir();
        dir.push(format!("formlet-no-such-dir-{}", std::process::id()));
        dir.push("message.txt");
        let state = test_state_with_file(dir.to_string_lossy().into_owned());

        let resp = submit_message(b"message=hi", &state).await;
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn test_create_user_confirms_name() {
        let resp = create_user(b"username=Alice");
        assert_eq!(resp.status(), 200);
        let body = body_text(resp).await;
        assert!(body.contains("New user called Alice"));
    }

    #[tokio::test]
    async fn test_create_user_without_name_renders_empty() {
        let resp = create_user(b"");
        assert_eq!(resp.status(), 200);
        let body = body_text(resp).await;
        assert!(body.contains("New user called </p>"));
    }

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::POST, false).is_none());

        let resp = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(resp.status(), 204);

        let resp = check_http_method(&Method::DELETE, false).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_body_size_gate() {
        let over = Request::builder()
            .header("content-length", "2048")
            .body(())
            .unwrap();
        assert_eq!(check_body_size(&over, 1024).unwrap().status(), 413);

        let under = Request::builder()
            .header("content-length", "10")
            .body(())
            .unwrap();
        assert!(check_body_size(&under, 1024).is_none());

        // Unparseable declarations are logged and skipped
        let bad = Request::builder()
            .header("content-length", "abc")
            .body(())
            .unwrap();
        assert!(check_body_size(&bad, 1024).is_none());
    }
}
