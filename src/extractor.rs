//! Extractors whose rejections are rendered as [`ApiError`] bodies instead of
//! axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Page {
        limit: i64,
    }

    #[derive(Deserialize)]
    struct Echo {
        text: String,
    }

    fn router() -> Router {
        Router::new()
            .route("/items/:id", get(|AppPath(id): AppPath<i64>| async move { id.to_string() }))
            .route(
                "/items",
                get(|AppQuery(page): AppQuery<Page>| async move { page.limit.to_string() })
                    .post(|AppJson(body): AppJson<Echo>| async move { body.text }),
            )
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn bad_path_segment_is_a_json_bad_request() {
        let (status, body) = call(get_request("/items/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn bad_query_is_a_json_bad_request() {
        let (status, body) = call(get_request("/items?limit=many")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn wrong_json_type_is_a_json_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":123}"#))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn valid_requests_pass_through() {
        let response = router().oneshot(get_request("/items/7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(get_request("/items?limit=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
