use axum::{
    extract::Request,
    http::{header, Method, Uri},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// Access log middleware; one `access_log` line per request
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_agent = header_or_dash(&request, header::USER_AGENT.as_str());
    let remote_addr = request
        .headers()
        .get("x-forwarded-for")
        .or_else(|| request.headers().get("x-real-ip"))
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    info!(
        target: "access_log",
        "{} {} \"{}\" {} {} {}ms \"{}\"",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        remote_addr,
        format_request(&method, &uri),
        status.as_u16(),
        size,
        duration.as_millis(),
        user_agent,
    );

    response
}

fn header_or_dash(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

fn format_request(method: &Method, uri: &Uri) -> String {
    format!("{} {} HTTP/1.1", method, uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_logging_middleware_passes_response_through() {
        let app = Router::new()
            .route("/listing", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(logging_middleware));

        let server = TestServer::new(app).unwrap();

        let response = server.get("/listing").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "ok");

        let response = server.get("/missing").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_format_request() {
        let uri: Uri = "/api/listing/get?offer=true".parse().unwrap();
        assert_eq!(
            format_request(&Method::GET, &uri),
            "GET /api/listing/get?offer=true HTTP/1.1"
        );
    }
}
