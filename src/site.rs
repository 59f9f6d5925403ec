//! Page assembly.
//!
//! Turns a request path and query string into a rendered page:
//!
//! ```text
//! path ─▶ Route ─▶ fetch (joined with marquee) ─▶ FilterState ─▶ derive ─▶ render
//! ```
//!
//! Each request fetches its documents fresh; the listing fetch and the shared
//! marquee fetch run concurrently and are joined before rendering. Everything
//! after the join is synchronous.
//!
//! A missing listing document renders the not-found page ("No works found.")
//! with a 200 status; an unknown slug on a detail route is a 404.

use crate::config::SiteConfig;
use crate::filter::FilterState;
use crate::listing::{ContentKind, Listable, ListingView};
use crate::render::Renderer;
use crate::store::{ContentStore, Fetched, LoadReport};
use maud::Markup;
use percent_encoding::percent_decode_str;

/// A recognized page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Listing(ContentKind),
    Work(String),
    Exhibition(String),
    Collection(String),
    Biography,
    NotFound,
}

impl Route {
    /// Map a request path (without query) to a route.
    ///
    /// Segments are percent-decoded, so `/works/caf%C3%A9` is the work with
    /// slug `café`. A segment that doesn't decode to UTF-8 matches nothing.
    pub fn parse(path: &str) -> Route {
        let decoded: Result<Vec<String>, _> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8().map(|d| d.into_owned()))
            .collect();
        let Ok(decoded) = decoded else {
            return Route::NotFound;
        };
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["biography"] => Route::Biography,
            ["works"] => Route::Listing(ContentKind::Works),
            ["exhibitions"] => Route::Listing(ContentKind::Exhibitions),
            ["collections"] => Route::Listing(ContentKind::Collections),
            ["publications"] => Route::Listing(ContentKind::Publications),
            ["works", slug] => Route::Work(slug.to_string()),
            ["exhibitions", slug] => Route::Exhibition(slug.to_string()),
            ["collections", slug] => Route::Collection(slug.to_string()),
            _ => Route::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

/// A rendered page and the status it should be served with.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub status: Status,
    pub html: String,
}

impl Rendered {
    fn ok(markup: Markup) -> Self {
        Self {
            status: Status::Ok,
            html: markup.into_string(),
        }
    }

    fn not_found(markup: Markup) -> Self {
        Self {
            status: Status::NotFound,
            html: markup.into_string(),
        }
    }
}

/// The content store, configuration, and renderer behind every page.
#[derive(Debug, Clone)]
pub struct Site {
    store: ContentStore,
    config: SiteConfig,
    renderer: Renderer,
}

impl Site {
    pub fn new(store: ContentStore, config: SiteConfig) -> Self {
        let renderer = Renderer::new(&config);
        Self {
            store,
            config,
            renderer,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render the page for `path` with the raw `query` string.
    pub async fn page(&self, path: &str, query: Option<&str>) -> Rendered {
        let route = Route::parse(path);
        tracing::debug!(?route, query, "rendering");
        self.render(&route, query).await
    }

    pub async fn render(&self, route: &Route, query: Option<&str>) -> Rendered {
        match route {
            Route::Home => self.home().await,
            Route::Biography => self.biography().await,
            Route::Listing(ContentKind::Works) => self.works(query).await,
            Route::Listing(ContentKind::Exhibitions) => self.exhibitions(query).await,
            Route::Listing(ContentKind::Collections) => self.collections(query).await,
            Route::Listing(ContentKind::Publications) => self.publications(query).await,
            Route::Work(slug) => {
                let (work, marquee) = tokio::join!(self.store.work(slug), self.store.marquee());
                match work {
                    Fetched::Found(work) => {
                        Rendered::ok(self.renderer.work_page(&work, marquee.as_deref()))
                    }
                    Fetched::Missing => self.unknown(ContentKind::Works, "work", marquee),
                }
            }
            Route::Exhibition(slug) => {
                let (exhibition, marquee) =
                    tokio::join!(self.store.exhibition(slug), self.store.marquee());
                match exhibition {
                    Fetched::Found(exhibition) => Rendered::ok(
                        self.renderer.exhibition_page(&exhibition, marquee.as_deref()),
                    ),
                    Fetched::Missing => self.unknown(ContentKind::Exhibitions, "exhibition", marquee),
                }
            }
            Route::Collection(slug) => {
                let (collection, marquee) =
                    tokio::join!(self.store.collection(slug), self.store.marquee());
                match collection {
                    Fetched::Found(collection) => Rendered::ok(
                        self.renderer.collection_page(&collection, marquee.as_deref()),
                    ),
                    Fetched::Missing => self.unknown(ContentKind::Collections, "collection", marquee),
                }
            }
            Route::NotFound => {
                let marquee = self.store.marquee().await;
                Rendered::not_found(self.renderer.not_found_page(
                    "/",
                    "This page does not exist.",
                    marquee.as_deref(),
                ))
            }
        }
    }

    fn view<T: Listable + Clone>(
        &self,
        kind: ContentKind,
        items: &[T],
        query: Option<&str>,
    ) -> ListingView<T> {
        let state = FilterState::initialize(query, kind.dimensions());
        ListingView::build(kind, Some(items), state, &self.config.policy(kind))
    }

    /// Not-found page for a listing whose document is missing.
    fn missing(&self, kind: ContentKind, marquee: Option<String>) -> Rendered {
        let message = format!("No {} found.", kind.slug());
        Rendered::ok(
            self.renderer
                .not_found_page(&kind.path(), &message, marquee.as_deref()),
        )
    }

    /// 404 for a detail route whose slug matches nothing.
    fn unknown(&self, kind: ContentKind, noun: &str, marquee: Option<String>) -> Rendered {
        let message = format!("No {noun} found at this address.");
        Rendered::not_found(
            self.renderer
                .not_found_page(&kind.path(), &message, marquee.as_deref()),
        )
    }

    async fn works(&self, query: Option<&str>) -> Rendered {
        let (works, marquee) = tokio::join!(self.store.works(), self.store.marquee());
        let Fetched::Found(loaded) = works else {
            return self.missing(ContentKind::Works, marquee);
        };
        let view = self.view(ContentKind::Works, &loaded.items, query);
        Rendered::ok(self.renderer.works_page(&view, marquee.as_deref()))
    }

    async fn exhibitions(&self, query: Option<&str>) -> Rendered {
        let (exhibitions, marquee) = tokio::join!(self.store.exhibitions(), self.store.marquee());
        let Fetched::Found(loaded) = exhibitions else {
            return self.missing(ContentKind::Exhibitions, marquee);
        };
        let view = self.view(ContentKind::Exhibitions, &loaded.items, query);
        Rendered::ok(self.renderer.exhibitions_page(&view, marquee.as_deref()))
    }

    async fn collections(&self, query: Option<&str>) -> Rendered {
        let (collections, marquee) = tokio::join!(self.store.collections(), self.store.marquee());
        let Fetched::Found(loaded) = collections else {
            return self.missing(ContentKind::Collections, marquee);
        };
        let listed: Vec<_> = loaded
            .items
            .into_iter()
            .filter(|c| !c.is_private())
            .collect();
        let view = self.view(ContentKind::Collections, &listed, query);
        Rendered::ok(self.renderer.collections_page(&view, marquee.as_deref()))
    }

    /// Publications take their intro text and the marquee from the home document.
    async fn publications(&self, query: Option<&str>) -> Rendered {
        let (publications, home) = tokio::join!(self.store.publications(), self.store.home());
        let home = home.found();
        let marquee = home.as_ref().and_then(|h| h.marquee_text.clone());
        let Fetched::Found(loaded) = publications else {
            return self.missing(ContentKind::Publications, marquee);
        };
        let intro = home.as_ref().and_then(|h| h.publication_text.as_deref());
        let view = self.view(ContentKind::Publications, &loaded.items, query);
        Rendered::ok(
            self.renderer
                .publications_page(&view, intro, marquee.as_deref()),
        )
    }

    async fn home(&self) -> Rendered {
        let (home, exhibitions) = tokio::join!(self.store.home(), self.store.exhibitions());
        let home = home.found();
        let marquee = home.as_ref().and_then(|h| h.marquee_text.clone());
        let current: Vec<_> = exhibitions
            .found()
            .map(|loaded| loaded.items)
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.is_current == Some(true))
            .collect();
        Rendered::ok(
            self.renderer
                .home_page(home.as_ref(), &current, marquee.as_deref()),
        )
    }

    async fn biography(&self) -> Rendered {
        match self.store.home().await {
            Fetched::Found(home) => Rendered::ok(
                self.renderer
                    .biography_page(Some(&home), home.marquee_text.as_deref()),
            ),
            Fetched::Missing => Rendered::ok(self.renderer.not_found_page(
                "/biography",
                "No biography found.",
                None,
            )),
        }
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    /// Load every document and summarize what a visitor would see.
    pub async fn inventory(&self) -> Inventory {
        let (works, exhibitions, collections, publications, home) = tokio::join!(
            self.store.works(),
            self.store.exhibitions(),
            self.store.collections(),
            self.store.publications(),
            self.store.home(),
        );

        let collections = collections.map(|mut loaded| {
            let before = loaded.items.len();
            loaded.items.retain(|c| !c.is_private());
            (before - loaded.items.len(), loaded)
        });

        Inventory {
            home: !home.is_missing(),
            entries: vec![
                self.entry(ContentKind::Works, works.map(|l| (0, l))),
                self.entry(ContentKind::Exhibitions, exhibitions.map(|l| (0, l))),
                self.entry(ContentKind::Collections, collections),
                self.entry(ContentKind::Publications, publications.map(|l| (0, l))),
            ],
        }
    }

    fn entry<T: Listable + Clone>(
        &self,
        kind: ContentKind,
        fetched: Fetched<(usize, crate::store::Loaded<T>)>,
    ) -> InventoryEntry {
        let Fetched::Found((hidden, loaded)) = fetched else {
            return InventoryEntry {
                kind,
                report: None,
                listed: 0,
                hidden: 0,
                years: Vec::new(),
                tags: Vec::new(),
            };
        };
        let view = self.view(kind, &loaded.items, None);
        InventoryEntry {
            kind,
            report: Some(loaded.report),
            listed: view.page.items().len(),
            hidden,
            years: view.years,
            tags: view.tags,
        }
    }
}

/// What `check` reports for the whole content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub home: bool,
    pub entries: Vec<InventoryEntry>,
}

/// Load and listing summary for one content type.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub kind: ContentKind,
    /// `None` when the document is missing.
    pub report: Option<LoadReport>,
    /// Items on the unfiltered listing after media check and dedupe.
    pub listed: usize,
    /// Private items excluded from the listing.
    pub hidden: usize,
    pub years: Vec<String>,
    pub tags: Vec<String>,
}
