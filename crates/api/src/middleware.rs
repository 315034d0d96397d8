use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request id we are willing to echo back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tag every request with an id, run it inside a span carrying that id, and
/// mirror the id on the response.
///
/// A well-formed `x-request-id` from the caller is kept; otherwise a UUIDv7 is
/// generated.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let request_id = extract_request_id(req.headers())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut res = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}

fn extract_request_id(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();

    let well_formed = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());

    well_formed.then_some(value)
}
