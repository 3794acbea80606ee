use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

const STATIC_PREFIX: &str = "/static/";

/// Long-lived caching for embedded assets, none for pages and fragments.
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_static_file = req.uri().path().starts_with(STATIC_PREFIX);
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    if is_static_file {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    } else {
        // Contact card state changes between requests
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "page" }))
            .route("/static/css/site.css", get(|| async { "css" }))
            .layer(from_fn(cache_control_middleware))
    }

    async fn cache_control(uri: &str) -> String {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        response.headers()[header::CACHE_CONTROL]
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn static_files_are_cached() {
        assert_eq!(
            cache_control("/static/css/site.css").await,
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn pages_are_not_cached() {
        assert!(cache_control("/").await.starts_with("no-store"));
    }
}
