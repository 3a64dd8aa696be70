use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use tracing::warn;

use crate::dto::StatusResponse;
use crate::error::UNAVAILABLE;
use crate::response::ErrorEnvelope;

/// Request deadline. A request still running after `limit` is answered with
/// the usual `200` envelope carrying the unavailable message.
pub async fn request_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!("Request to {} exceeded {:?}", path, limit);
            Json(StatusResponse::from_error(UNAVAILABLE.to_string())).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn slow() -> Json<StatusResponse> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(StatusResponse::ok())
    }

    async fn fast() -> Json<StatusResponse> {
        Json(StatusResponse::ok())
    }

    fn router(limit: Duration) -> Router {
        Router::new()
            .route("/slow", post(slow))
            .route("/fast", post(fast))
            .layer(from_fn_with_state(limit, request_deadline))
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_slow_request_gets_unavailable_envelope() {
        let (status, body) = call(router(Duration::from_millis(20)), "/slow").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_fast_request_passes_through() {
        let (status, body) = call(router(Duration::from_secs(5)), "/fast").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "");
    }
}
