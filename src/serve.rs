//! HTTP server.
//!
//! Every page route is handled by the same handler: the request path picks the
//! [`Route`](crate::site::Route) and the raw query string becomes the page's
//! filter state, so `/works?year=2023&classification=paintings` is all the
//! state there is.
//!
//! | Path | Page |
//! |------|------|
//! | `/` | Home |
//! | `/works`, `/works/{slug}` | Works listing, work detail |
//! | `/exhibitions`, `/exhibitions/{slug}` | Exhibitions listing, detail |
//! | `/collections`, `/collections/{slug}` | Collections listing, detail |
//! | `/publications` | Publications |
//! | `/biography` | Biography |
//! | `/scroll.js` | Strip scroll persistence script |
//!
//! Anything else gets the not-found page with a 404.

use crate::config::{ConfigError, SiteConfig};
use crate::render::SCROLL_JS;
use crate::site::{Site, Status};
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Build the router for a site.
pub fn router(site: Site) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/works", get(page))
        .route("/works/{slug}", get(page))
        .route("/exhibitions", get(page))
        .route("/exhibitions/{slug}", get(page))
        .route("/collections", get(page))
        .route("/collections/{slug}", get(page))
        .route("/publications", get(page))
        .route("/biography", get(page))
        .route("/scroll.js", get(scroll_js))
        .fallback(page)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(site))
}

async fn page(State(site): State<Arc<Site>>, uri: Uri, RawQuery(query): RawQuery) -> Response {
    let rendered = site.page(uri.path(), query.as_deref()).await;
    let status = match rendered.status {
        Status::Ok => StatusCode::OK,
        Status::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Html(rendered.html)).into_response()
}

async fn scroll_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCROLL_JS,
    )
}

/// Address to listen on: `bind` when given, else `server.bind` from config.
pub fn listen_addr(config: &SiteConfig, bind: Option<SocketAddr>) -> Result<SocketAddr, ServeError> {
    match bind {
        Some(addr) => Ok(addr),
        None => Ok(config.server.bind_addr()?),
    }
}

/// Serve `site` until Ctrl-C or SIGTERM.
///
/// `bind` overrides the configured address.
pub async fn run(site: Site, bind: Option<SocketAddr>) -> Result<(), ServeError> {
    let addr = listen_addr(site.config(), bind)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    tracing::info!(%local, "listening");

    axum::serve(listener, router(site))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentStore;
    use crate::test_helpers::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn app(tmp: &tempfile::TempDir) -> Router {
        router(Site::new(ContentStore::new(tmp.path()), SiteConfig::default()))
    }

    #[tokio::test]
    async fn query_string_reaches_the_page() {
        let tmp = setup_fixtures();
        let (status, body) = get_page(app(&tmp), "/works?classification=drawings").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-id="w-tide-study""#));
        assert!(!body.contains(r#"data-id="w-red-room""#));
    }

    #[tokio::test]
    async fn unknown_path_is_404_page() {
        let tmp = setup_fixtures();
        let (status, body) = get_page(app(&tmp), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("This page does not exist."));
    }

    #[tokio::test]
    async fn scroll_script_is_served() {
        let tmp = setup_fixtures();
        let response = app(&tmp)
            .oneshot(Request::builder().uri("/scroll.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
    }

    #[test]
    fn listen_addr_prefers_the_override() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        assert_eq!(listen_addr(&SiteConfig::default(), Some(addr)).unwrap(), addr);
        assert_eq!(
            listen_addr(&SiteConfig::default(), None).unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn unparseable_configured_bind_is_a_config_error() {
        let mut config = SiteConfig::default();
        config.server.bind = "not an address".to_string();
        let err = listen_addr(&config, None).unwrap_err();
        assert!(matches!(err, ServeError::Config(_)));
        assert!(err.to_string().contains("server.bind"));
    }
}
