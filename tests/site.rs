//! End-to-end tests driving the HTTP router against the fixture content.
//!
//! Run with: cargo test --test site

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use folio::config::load_config;
use folio::serve::router;
use folio::site::Site;
use folio::store::ContentStore;
use http_body_util::BodyExt;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

fn fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

fn app(content: &Path) -> Router {
    let config = load_config(content).unwrap();
    router(Site::new(ContentStore::new(content), config))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Pull the unescaped href of the first `<a>` whose text is exactly `label`.
fn link_to(html: &str, label: &str) -> String {
    let end = html
        .find(&format!(">{label}</a>"))
        .unwrap_or_else(|| panic!("no link labelled {label}"));
    let start = html[..end].rfind("href=\"").unwrap() + "href=\"".len();
    let close = start + html[start..].find('"').unwrap();
    html[start..close].replace("&amp;", "&")
}

#[tokio::test]
async fn every_route_renders() {
    let tmp = fixtures();
    for uri in [
        "/",
        "/works",
        "/works/blue-field",
        "/exhibitions",
        "/exhibitions/tides",
        "/collections",
        "/collections/city-museum",
        "/publications",
        "/biography",
    ] {
        let (status, body) = get(app(tmp.path()), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.starts_with("<!DOCTYPE html>"), "{uri}");
        assert!(body.contains("<title>"), "{uri}");
    }
}

#[tokio::test]
async fn following_a_filter_link_twice_returns_to_the_start() {
    let tmp = fixtures();
    let (_, unfiltered) = get(app(tmp.path()), "/works").await;

    let paintings = link_to(&unfiltered, "Paintings");
    assert_eq!(paintings, "/works?classification=paintings");

    let (_, filtered) = get(app(tmp.path()), &paintings).await;
    assert!(filtered.contains(r#"data-id="w-red-room""#));
    assert!(!filtered.contains(r#"data-id="w-tide-study""#));

    let back = link_to(&filtered, "Paintings");
    assert_eq!(back, "/works");
}

#[tokio::test]
async fn filters_combine_across_requests() {
    let tmp = fixtures();
    let (_, body) = get(app(tmp.path()), "/works?year=2023").await;
    let both = link_to(&body, "Paintings");
    assert_eq!(both, "/works?year=2023&classification=paintings");

    let (_, body) = get(app(tmp.path()), &both).await;
    assert!(body.contains(r#"data-id="w-blue-field""#));
    assert!(!body.contains(r#"data-id="w-red-room""#));
    assert!(!body.contains(r#"data-id="w-tide-study""#));
}

#[tokio::test]
async fn filtered_work_list_is_grouped_newest_first() {
    let tmp = fixtures();
    let (_, body) = get(app(tmp.path()), "/works?classification=paintings&view=list").await;
    let y2023 = body.find(r#"data-year="2023""#).unwrap();
    let y2021 = body.find(r#"data-year="2021""#).unwrap();
    let y2020 = body.find(r#"data-year="2020""#).unwrap();
    assert!(y2023 < y2021 && y2021 < y2020);
}

#[tokio::test]
async fn unfiltered_works_strip_carries_scroll_key() {
    let tmp = fixtures();
    let (_, body) = get(app(tmp.path()), "/works").await;
    assert!(body.contains(r#"data-scroll-key="works-scroll-all-all""#));
    // Every work appears once even though the fixture lists some twice.
    assert_eq!(body.matches(r#"data-id="w-blue-field""#).count(), 1);
    assert_eq!(body.matches(r#"data-id="w-tide-study""#).count(), 1);
}

#[tokio::test]
async fn each_year_and_classification_gets_its_own_scroll_key() {
    let tmp = fixtures();
    for (uri, key) in [
        ("/works?classification=paintings", "works-scroll-all-paintings"),
        ("/works?year=2023", "works-scroll-2023-all"),
        ("/works?year=2023&classification=paintings", "works-scroll-2023-paintings"),
    ] {
        let (_, body) = get(app(tmp.path()), uri).await;
        assert!(body.contains(&format!(r#"data-scroll-key="{key}""#)), "{uri}");
        assert!(body.contains(r#"src="/scroll.js""#), "{uri}");
    }

    let (_, list) = get(app(tmp.path()), "/works?classification=paintings&view=list").await;
    assert!(!list.contains("data-scroll-key"));
}

#[tokio::test]
async fn empty_filter_result_is_empty_state() {
    let tmp = fixtures();
    let (status, body) = get(app(tmp.path()), "/exhibitions?status=past&format=solo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No exhibitions match these filters."));
}

#[tokio::test]
async fn missing_documents_render_not_found() {
    let tmp = TempDir::new().unwrap();
    let (status, body) = get(app(tmp.path()), "/collections").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No collections found."));

    let (status, _) = get(app(tmp.path()), "/collections/city-museum").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn encoded_slugs_reach_their_detail_page() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("works.json"),
        r#"[{"_id": "w-cafe", "title": "Café Interior", "slug": {"current": "café"},
             "images": [{"url": "https://example.com/cafe.jpg"}]}]"#,
    )
    .unwrap();
    let (status, body) = get(app(tmp.path()), "/works/caf%C3%A9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Café Interior"));
}

#[tokio::test]
async fn unknown_paths_are_404() {
    let tmp = fixtures();
    let (status, body) = get(app(tmp.path()), "/works/blue-field/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not found"));
}
