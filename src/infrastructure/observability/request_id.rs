use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Caller-supplied id, if it is non-empty, at most [`MAX_REQUEST_ID_LEN`]
/// bytes and visible ASCII only.
pub fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .filter(|id| id.chars().all(|c| c.is_ascii_graphic()))
        .map(String::from)
}

/// Tags every upload with an id, attaches it to the request span and echoes
/// it in the response so client reports can be matched to server logs.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = match incoming_request_id(request.headers()) {
        Some(id) => id,
        None => {
            let generated = Uuid::new_v4().to_string();
            tracing::trace!(request_id = %generated, "Generated request id");
            generated
        }
    };

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "upload",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
