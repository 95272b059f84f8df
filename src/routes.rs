use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    // Graph and format subrouters live under /api/v1
    let api_v1 = Router::new()
        .nest("/graph", crate::api::routes::graph_routes::graph_routes())
        .nest("/format", crate::api::routes::format_routes::format_routes());

    Router::new()
        // Root route
        .route("/", get(root))
        // Health check
        .route("/health", get(health_check))
        // API v1
        .nest("/api/v1", api_v1)

        // Fallback handler for 404
        .fallback(handler_404)
        .layer(CorsLayer::very_permissive())
}

// Handler for root
async fn root() -> &'static str {
    "Server is running!"
}

// Handler for health check
async fn health_check() -> &'static str {
    "OK"
}

// Handler for 404 Not Found
async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::core::util::date_util::{DateLabeler, FixedClock};
    use crate::domain::graph::service::GraphService;

    fn app() -> Router {
        let now = DateTime::parse_from_rfc3339("2023-07-09T13:00:00Z").unwrap().with_timezone(&Utc);
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            graph_service: Arc::new(GraphService::new(
                DateLabeler::utc(),
                Arc::new(FixedClock(now)),
                None,
                "en",
            )),
        };
        app_router().with_state(state)
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_fallback() {
        let res = app().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app().oneshot(get_req("/nope")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn step_endpoint() {
        let (status, body) = send(get_req(
            "/api/v1/graph/step?start=2023-07-09T10:00:00Z&end=2023-07-09T13:00:00Z",
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_successful"], true);
        assert_eq!(body["data"]["step"], "10m");

        let (_, body) = send(get_req("/api/v1/graph/step")).await;
        assert_eq!(body["data"]["step"], "1h");
    }

    #[tokio::test]
    async fn parse_endpoint_returns_rows() {
        let payload = json!({
            "response": {
                "status": "success",
                "data": {
                    "resultType": "matrix",
                    "result": [{
                        "metric": { "data_label": "CPU_usage" },
                        "values": [[1688900400, "10"], [1688904000, "20"]]
                    }]
                }
            },
            "label": "CPU_usage",
            "locale": "en",
            "start": "2023-07-09T10:00:00.000Z",
            "end": "2023-07-09T13:00:00.000Z"
        });

        let (status, body) = send(post_json("/api/v1/graph/parse", payload)).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["data"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 19);
        assert_eq!(rows[6], json!({ "date": "7/9/2023, 11:00:00 AM", "CPU": 10.0 }));
        assert_eq!(rows[7], json!({ "date": "7/9/2023, 11:10:00 AM", "CPU": null }));
    }

    #[tokio::test]
    async fn parse_endpoint_without_series_is_null() {
        let (status, body) = send(post_json(
            "/api/v1/graph/parse",
            json!({ "response": null, "label": "GPU_usage" }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_successful"], true);
        assert!(body["data"]["rows"].is_null());
    }

    #[tokio::test]
    async fn parse_endpoint_validates_label() {
        let (status, body) = send(post_json("/api/v1/graph/parse", json!({ "label": "" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["is_successful"], false);
        assert_eq!(body["error_code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn fill_endpoint_inserts_null_rows() {
        let payload = json!({
            "rows": [{ "date": "7/9/2023, 11:00:00 AM", "CPU": 10.0 }],
            "start": "2023-07-09T10:00:00Z",
            "end": "2023-07-09T12:00:00Z",
            "step": "1h"
        });

        let (status, body) = send(post_json("/api/v1/graph/fill", payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["rows"],
            json!([
                { "date": "7/9/2023, 10:00:00 AM", "CPU": null },
                { "date": "7/9/2023, 11:00:00 AM", "CPU": 10.0 },
                { "date": "7/9/2023, 12:00:00 PM", "CPU": null }
            ])
        );
    }

    #[tokio::test]
    async fn fill_endpoint_rejects_oversized_grid() {
        let payload = json!({
            "rows": [{ "date": "7/9/2023, 11:00:00 AM", "CPU": 10.0 }],
            "start": "1000-01-01T00:00:00Z",
            "end": "9000-01-01T00:00:00Z",
            "step": "1s"
        });

        let (status, body) = send(post_json("/api/v1/graph/fill", payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "BAD_REQUEST");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn merge_endpoint() {
        let payload = json!({
            "series": [
                [{ "date": "d1", "CPU": 10, "Memory": 50 }],
                null,
                [{ "date": "d1", "CPU": 20, "Storage": 30 }]
            ]
        });

        let (_, body) = send(post_json("/api/v1/graph/merge", payload)).await;

        assert_eq!(
            body["data"],
            json!([{ "date": "d1", "CPU": 20.0, "Memory": 50.0, "Storage": 30.0 }])
        );
    }

    #[tokio::test]
    async fn date_range_endpoint() {
        let (_, body) = send(get_req("/api/v1/graph/date-range?from=2023-07-01&to=2023-07-05")).await;

        assert_eq!(body["data"]["start"], "2023-07-01T00:00:00.000Z");
        assert_eq!(body["data"]["end"], "2023-07-06T00:00:00.000Z");
        assert_eq!(body["data"]["step"], "10m");
    }

    #[tokio::test]
    async fn energy_endpoints() {
        let (_, body) = send(post_json("/api/v1/graph/energy/donut", Value::Null)).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 11);
        assert_eq!(body["data"][1], json!({ "name": "CPU" }));

        let (status, body) = send(get_req("/api/v1/graph/energy/all")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["rows"].is_null());

        let (status, _) = send(get_req("/api/v1/graph/energy/toaster")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn format_endpoint() {
        let (_, body) = send(get_req("/api/v1/format/bytes?value=1048576")).await;
        assert_eq!(body["data"]["text"], "1.00 MiB");

        let (_, body) = send(get_req("/api/v1/format/percent")).await;
        assert_eq!(body["data"]["text"], "- %");

        let (status, body) = send(get_req("/api/v1/format/volts?value=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_code"], "NOT_FOUND");
    }
}
