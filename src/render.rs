//! HTML rendering.
//!
//! Maps fetched and derived content to HTML. Nothing here decides which items
//! appear or in what order; that is the listing pipeline's job. The renderer
//! only picks a layout and draws it.
//!
//! ## Pages
//!
//! - **Home** (`/`): image gallery and current exhibitions
//! - **Listings** (`/works`, `/exhibitions`, `/collections`, `/publications`):
//!   filter controls, view switch, and the derived items
//! - **Details** (`/works/{slug}`, `/exhibitions/{slug}`, `/collections/{slug}`)
//! - **Biography** (`/biography`): text and image modules, contact links
//! - **Not found**: shown for missing documents and unknown slugs
//!
//! ## Listing layouts
//!
//! | Layout | When |
//! |--------|------|
//! | Strip | works, grid view, no filter active |
//! | Year sections | `grouped` listings (works: only while a filter is active) |
//! | Grid | `view=grid` (default) |
//! | List | `view=list` |
//!
//! Every filter control is a plain link to the URL of the state clicking it
//! produces, marked `active` when its value is selected.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/scroll.js`: Strip scroll persistence, served at `/scroll.js`
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::assets::AssetResolver;
use crate::config::{self, ListingsConfig, SiteConfig, SiteInfo};
use crate::filter::{ALL, Dimension, FilterState, ViewMode};
use crate::labels::{self, display_title, or_placeholder, tag_label};
use crate::listing::{ContentKind, Listable, ListingView, PageState, group_by_year};
use crate::scroll::scroll_key;
use crate::types::{
    BioModule, Collection, Exhibition, Home, Media, Publication, Work, WorkPublication, WorkSummary,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Strip scroll persistence script, served at `/scroll.js`.
pub const SCROLL_JS: &str = include_str!("../static/scroll.js");

/// Card image width requested from the CDN.
const CARD_WIDTH: u32 = 800;
/// Detail image width requested from the CDN.
const DETAIL_WIDTH: u32 = 1600;

const NAV: &[(&str, &str)] = &[
    ("/works", "Works"),
    ("/exhibitions", "Exhibitions"),
    ("/collections", "Collections"),
    ("/publications", "Publications"),
    ("/biography", "Biography"),
];

/// Renders pages with the site's chrome, colors, and asset resolution.
#[derive(Debug, Clone)]
pub struct Renderer {
    site: SiteInfo,
    css: String,
    assets: AssetResolver,
    listings: ListingsConfig,
}

impl Renderer {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            site: config.site.clone(),
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            assets: AssetResolver::new(&config.assets),
            listings: config.listings.clone(),
        }
    }

    // ========================================================================
    // Chrome
    // ========================================================================

    /// Full document: head, site header, optional marquee, and `content`.
    fn document(
        &self,
        title: Option<&str>,
        current_path: &str,
        marquee: Option<&str>,
        content: Markup,
    ) -> Markup {
        let page_title = match title {
            Some(t) => format!("{} | {}", t, self.site.title),
            None => self.site.title.clone(),
        };
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (page_title) }
                    style { (PreEscaped(&self.css)) }
                }
                body {
                    (self.site_header(current_path))
                    @if let Some(text) = marquee {
                        (render_marquee(text))
                    }
                    (content)
                }
            }
        }
    }

    fn site_header(&self, current_path: &str) -> Markup {
        html! {
            header.site-header {
                a.site-title href="/" { (self.site.title) }
                nav.site-nav {
                    ul {
                        @for (path, label) in NAV {
                            @let is_current = is_current(path, current_path);
                            li class=[is_current.then_some("current")] {
                                a href=(path) aria-current=[is_current.then_some("page")] { (label) }
                            }
                        }
                    }
                }
            }
        }
    }

    fn image(&self, media: &Media, width: u32, fallback_alt: &str) -> Markup {
        let alt = media.alt.as_deref().unwrap_or(fallback_alt);
        let orientation = if media.is_landscape() { "landscape" } else { "portrait" };
        html! {
            @if let Some(src) = self.assets.image_url(media, Some(width)) {
                img class=(orientation) src=(src) alt=(alt) loading="lazy";
            } @else {
                div.image-placeholder role="img" aria-label=(alt) {}
            }
        }
    }

    // ========================================================================
    // Listing pages
    // ========================================================================

    pub fn works_page(&self, view: &ListingView<Work>, marquee: Option<&str>) -> Markup {
        let grouped = self.listings.works.grouped && view.state.active_filters().next().is_some();

        let body = match &view.page {
            PageState::Populated(items) if view.state.view_mode() == ViewMode::Grid => {
                self.works_strip(view, items)
            }
            _ => self.listing_body(view, grouped, |w| self.work_card(w), work_row),
        };

        let content = html! {
            main.listing-page.works-page {
                h1.visually-hidden { "Works" }
                (self.filter_controls(view))
                (body)
            }
        };
        self.document(Some("Works"), &view.kind.path(), marquee, content)
    }

    /// Horizontally scrolled works grid. A selected year gets its own headed
    /// strip; either way the strip carries the key for its year/classification
    /// selection.
    fn works_strip(&self, view: &ListingView<Work>, items: &[Work]) -> Markup {
        let key = scroll_key(view.kind, &view.state);
        let year = view.state.get(Dimension::Year);
        let strip = html! {
            div.strip data-scroll-key=(key) {
                @for work in items {
                    (self.work_card(work))
                }
            }
        };
        html! {
            @if year == ALL {
                (strip)
            } @else {
                section.year-group data-year=(year) {
                    h2.year-heading { (year) }
                    (strip)
                }
            }
            script src="/scroll.js" defer {}
        }
    }

    pub fn exhibitions_page(&self, view: &ListingView<Exhibition>, marquee: Option<&str>) -> Markup {
        let body = self.listing_body(
            view,
            self.listings.exhibitions.grouped,
            |e| self.exhibition_card(e),
            exhibition_row,
        );
        let content = html! {
            main.listing-page.exhibitions-page {
                h1.visually-hidden { "Exhibitions" }
                (self.filter_controls(view))
                (body)
            }
        };
        self.document(Some("Exhibitions"), &view.kind.path(), marquee, content)
    }

    pub fn collections_page(&self, view: &ListingView<Collection>, marquee: Option<&str>) -> Markup {
        let body = self.listing_body(
            view,
            self.listings.collections.grouped,
            |c| self.collection_card(c),
            collection_row,
        );
        let content = html! {
            main.listing-page.collections-page {
                h1.visually-hidden { "Collections" }
                (self.filter_controls(view))
                (body)
            }
        };
        self.document(Some("Collections"), &view.kind.path(), marquee, content)
    }

    /// Publications always render as a list, under the optional intro text.
    pub fn publications_page(
        &self,
        view: &ListingView<Publication>,
        intro: Option<&str>,
        marquee: Option<&str>,
    ) -> Markup {
        let list = |items: &[&Publication]| {
            html! {
                ul.publication-list {
                    @for publication in items {
                        (self.publication_entry(publication))
                    }
                }
            }
        };
        let body = match &view.page {
            PageState::Populated(items) if self.listings.publications.grouped => html! {
                @for group in group_by_year(items) {
                    section.year-group data-year=(group.key.label()) {
                        h2.year-heading { (group.key.label()) }
                        (list(group.items.as_slice()))
                    }
                }
            },
            PageState::Populated(items) => list(items.iter().collect::<Vec<_>>().as_slice()),
            page => page_state_message(view.kind, page),
        };
        let content = html! {
            main.listing-page.publications-page {
                h1 { "Publications" }
                @if let Some(text) = intro {
                    div.intro { (markdown(text)) }
                }
                (self.filter_controls(view))
                (body)
            }
        };
        self.document(Some("Publications"), &view.kind.path(), marquee, content)
    }

    /// Loading and empty states, or the items in grid/list form, optionally
    /// split into year sections.
    fn listing_body<T: Listable>(
        &self,
        view: &ListingView<T>,
        grouped: bool,
        card: impl Fn(&T) -> Markup,
        row: impl Fn(&T) -> Markup,
    ) -> Markup {
        let PageState::Populated(items) = &view.page else {
            return page_state_message(view.kind, &view.page);
        };
        let mode = view.state.view_mode();
        let layout = |items: &[&T]| match mode {
            ViewMode::Grid => html! {
                div.grid {
                    @for item in items { (card(*item)) }
                }
            },
            ViewMode::List => html! {
                ul.list {
                    @for item in items { (row(*item)) }
                }
            },
        };
        if grouped {
            html! {
                @for group in group_by_year(items) {
                    section.year-group data-year=(group.key.label()) {
                        h2.year-heading { (group.key.label()) }
                        (layout(group.items.as_slice()))
                    }
                }
            }
        } else {
            layout(items.iter().collect::<Vec<_>>().as_slice())
        }
    }

    /// Filter links for every dimension the page recognizes, plus the view switch.
    pub fn filter_controls<T>(&self, view: &ListingView<T>) -> Markup {
        let path = view.kind.path();
        let state = &view.state;
        html! {
            nav.filters aria-label="Filters" {
                @for &dim in view.kind.dimensions() {
                    @if dim.is_filtering() {
                        (filter_group(&path, state, dim, &options(view, dim)))
                    }
                }
                @if view.kind.dimensions().contains(&Dimension::View) {
                    (view_switch(&path, state))
                }
            }
        }
    }

    // ========================================================================
    // Cards and entries
    // ========================================================================

    fn work_card(&self, work: &Work) -> Markup {
        let title = display_title(work.title.as_deref());
        let body = html! {
            @if let Some(media) = work.images.first() {
                (self.image(media, CARD_WIDTH, title))
            }
            span.card-title { (title) }
            span.card-meta { (or_placeholder(work.year.as_deref())) }
        };
        html! {
            article.card.work-card data-id=(work.id) {
                (item_link(detail_href(ContentKind::Works, work.slug.as_deref()), body))
            }
        }
    }

    fn work_summary_card(&self, work: &WorkSummary) -> Markup {
        let title = display_title(work.title.as_deref());
        let body = html! {
            @if let Some(media) = work.images.first() {
                (self.image(media, CARD_WIDTH, title))
            }
            span.card-title { (title) }
            span.card-meta { (or_placeholder(work.year.as_deref())) }
        };
        html! {
            article.card.work-card data-id=(work.id) {
                (item_link(detail_href(ContentKind::Works, work.slug.as_deref()), body))
            }
        }
    }

    fn exhibition_card(&self, exhibition: &Exhibition) -> Markup {
        let title = display_title(exhibition.title.as_deref());
        let cover = exhibition
            .exhibition_photos
            .first()
            .or_else(|| exhibition.assigned_works.iter().find_map(|w| w.images.first()));
        let body = html! {
            @if let Some(media) = cover {
                (self.image(media, CARD_WIDTH, title))
            }
            span.card-title { (title) }
            span.card-meta {
                (labels::format_date_range(exhibition.date.as_deref(), exhibition.end_date.as_deref()))
            }
            @if let Some(location) = &exhibition.location {
                span.card-location { (location) }
            }
        };
        html! {
            article.card.exhibition-card data-id=(exhibition.id) {
                (item_link(detail_href(ContentKind::Exhibitions, exhibition.slug.as_deref()), body))
            }
        }
    }

    fn collection_card(&self, collection: &Collection) -> Markup {
        let title = display_title(collection.title.as_deref());
        let cover = collection
            .collection_photos
            .first()
            .or_else(|| collection.assigned_works.iter().find_map(|w| w.images.first()));
        let body = html! {
            @if let Some(media) = cover {
                (self.image(media, CARD_WIDTH, title))
            }
            span.card-title { (title) }
            @if let Some(location) = &collection.location {
                span.card-location { (location) }
            }
        };
        html! {
            article.card.collection-card data-id=(collection.id) {
                (item_link(detail_href(ContentKind::Collections, collection.slug.as_deref()), body))
            }
        }
    }

    fn publication_entry(&self, publication: &Publication) -> Markup {
        let title = display_title(publication.title.as_deref());
        let target = publication
            .link
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| publication.file.as_ref().and_then(|f| self.assets.file_url(f)));
        html! {
            li.publication data-id=(publication.id) {
                @if let Some(media) = publication.images.first() {
                    (self.image(media, CARD_WIDTH, title))
                }
                div.publication-text {
                    @if let Some(href) = target {
                        a.publication-title href=(href) target="_blank" rel="noopener" { (title) }
                    } @else {
                        span.publication-title { (title) }
                    }
                    span.publication-year { (or_placeholder(publication.year.as_deref())) }
                    @if !publication.publication_types.is_empty() {
                        span.publication-types {
                            (publication.publication_types.iter().map(|t| tag_label(t)).collect::<Vec<_>>().join(", "))
                        }
                    }
                    @if let Some(description) = &publication.description {
                        div.publication-description { (markdown(description)) }
                    }
                }
            }
        }
    }

    fn work_publication_entry(&self, publication: &WorkPublication) -> Markup {
        let title = display_title(publication.title.as_deref());
        let target = publication
            .link
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| publication.file.as_ref().and_then(|f| self.assets.file_url(f)));
        html! {
            li {
                @if let Some(href) = target {
                    a href=(href) target="_blank" rel="noopener" { (title) }
                } @else {
                    (title)
                }
                @if let Some(year) = &publication.year {
                    ", " (year)
                }
                @if let Some(description) = &publication.description {
                    div.publication-description { (markdown(description)) }
                }
            }
        }
    }

    // ========================================================================
    // Detail pages
    // ========================================================================

    pub fn work_page(&self, work: &Work, marquee: Option<&str>) -> Markup {
        let title = display_title(work.title.as_deref());
        let content = html! {
            main.detail-page.work-detail {
                a.back-link href=(ContentKind::Works.path()) { "← Works" }
                div.detail-images {
                    @for media in &work.images {
                        figure {
                            (self.image(media, DETAIL_WIDTH, title))
                            @if let Some(caption) = &media.caption {
                                figcaption { (caption) }
                            }
                        }
                    }
                }
                header.detail-header {
                    h1 { (title) }
                    dl.facts {
                        dt { "Year" } dd { (or_placeholder(work.year.as_deref())) }
                        @if let Some(classification) = &work.classification {
                            dt { "Classification" } dd { (tag_label(classification)) }
                        }
                        @if let Some(medium) = &work.description_medium {
                            dt { "Medium" } dd { (medium) }
                        }
                        @if let Some(size) = &work.size {
                            dt { "Size" } dd { (size) }
                        }
                        @if let Some(location) = &work.location {
                            dt { "Location" } dd { (location) }
                        }
                    }
                }
                @if let Some(description) = &work.description {
                    div.description { (markdown(description)) }
                }
                @if !work.publications.is_empty() {
                    section.work-publications {
                        h2 { "Publications" }
                        ul {
                            @for publication in &work.publications {
                                (self.work_publication_entry(publication))
                            }
                        }
                    }
                }
            }
        };
        self.document(Some(title), &ContentKind::Works.path(), marquee, content)
    }

    pub fn exhibition_page(&self, exhibition: &Exhibition, marquee: Option<&str>) -> Markup {
        let title = display_title(exhibition.title.as_deref());
        let format = match exhibition.is_solo {
            Some(true) => Some("Solo exhibition"),
            Some(false) => Some("Group exhibition"),
            None => None,
        };
        let content = html! {
            main.detail-page.exhibition-detail {
                a.back-link href=(ContentKind::Exhibitions.path()) { "← Exhibitions" }
                header.detail-header {
                    h1 { (title) }
                    p.dates {
                        (labels::format_date_range(exhibition.date.as_deref(), exhibition.end_date.as_deref()))
                    }
                    @if let Some(location) = &exhibition.location {
                        p.location { (location) }
                    }
                    @if let Some(format) = format {
                        p.format { (format) }
                    }
                    @if exhibition.is_current == Some(true) {
                        p.badge { "Current" }
                    }
                }
                @if let Some(description) = &exhibition.description {
                    div.description { (markdown(description)) }
                } @else if let Some(short) = &exhibition.short_description {
                    div.description { (markdown(short)) }
                }
                @if !exhibition.exhibition_photos.is_empty() {
                    section.photos {
                        @for media in &exhibition.exhibition_photos {
                            figure {
                                (self.image(media, DETAIL_WIDTH, title))
                                @if let Some(caption) = &media.caption {
                                    figcaption { (caption) }
                                }
                            }
                        }
                    }
                }
                @if !exhibition.assigned_works.is_empty() {
                    section.assigned-works {
                        h2 { "Works" }
                        div.grid {
                            @for work in &exhibition.assigned_works {
                                (self.work_summary_card(work))
                            }
                        }
                    }
                }
                @if let Some(credits) = &exhibition.photo_credits {
                    div.photo-credits { (markdown(credits)) }
                }
            }
        };
        self.document(Some(title), &ContentKind::Exhibitions.path(), marquee, content)
    }

    pub fn collection_page(&self, collection: &Collection, marquee: Option<&str>) -> Markup {
        let title = display_title(collection.title.as_deref());
        let content = html! {
            main.detail-page.collection-detail {
                a.back-link href=(ContentKind::Collections.path()) { "← Collections" }
                header.detail-header {
                    h1 { (title) }
                    @if let Some(location) = &collection.location {
                        p.location { (location) }
                    }
                    p.dates { (labels::format_date(collection.date.as_deref())) }
                }
                @if let Some(description) = &collection.description {
                    div.description { (markdown(description)) }
                } @else if let Some(short) = &collection.short_description {
                    div.description { (markdown(short)) }
                }
                @if !collection.collection_photos.is_empty() {
                    section.photos {
                        @for media in &collection.collection_photos {
                            figure { (self.image(media, DETAIL_WIDTH, title)) }
                        }
                    }
                }
                @if !collection.assigned_works.is_empty() {
                    section.assigned-works {
                        h2 { "Works" }
                        div.grid {
                            @for work in &collection.assigned_works {
                                (self.work_summary_card(work))
                            }
                        }
                    }
                }
            }
        };
        self.document(Some(title), &ContentKind::Collections.path(), marquee, content)
    }

    // ========================================================================
    // Home, biography, not found
    // ========================================================================

    /// Gallery from the home document and the exhibitions marked current.
    pub fn home_page(&self, home: Option<&Home>, current: &[Exhibition], marquee: Option<&str>) -> Markup {
        let gallery = home.map(|h| h.image_gallery.as_slice()).unwrap_or_default();
        let alt = home
            .and_then(|h| h.title.as_deref())
            .unwrap_or(&self.site.title);
        let content = html! {
            main.home-page {
                @if !gallery.is_empty() {
                    section.gallery {
                        @for media in gallery {
                            (self.image(media, DETAIL_WIDTH, alt))
                        }
                    }
                }
                @if !current.is_empty() {
                    section.current-exhibitions {
                        h2 { "Current" }
                        div.grid {
                            @for exhibition in current {
                                (self.exhibition_card(exhibition))
                            }
                        }
                    }
                }
            }
        };
        self.document(None, "/", marquee, content)
    }

    pub fn biography_page(&self, home: Option<&Home>, marquee: Option<&str>) -> Markup {
        let modules = home.map(|h| h.bio_modules.as_slice()).unwrap_or_default();
        let content = html! {
            main.biography-page {
                h1.visually-hidden { "Biography" }
                @for module in modules {
                    (self.bio_module(module))
                }
                @if !self.site.contact_email.is_empty() || !self.site.instagram.is_empty() {
                    section.contact {
                        h2 { "Contact" }
                        ul {
                            @if !self.site.contact_email.is_empty() {
                                li { a href={ "mailto:" (self.site.contact_email) } { (self.site.contact_email) } }
                            }
                            @if !self.site.instagram.is_empty() {
                                li { a href=(self.site.instagram) target="_blank" rel="noopener" { "Instagram" } }
                            }
                        }
                    }
                }
            }
        };
        self.document(Some("Biography"), "/biography", marquee, content)
    }

    fn bio_module(&self, module: &BioModule) -> Markup {
        let layout = module.layout.as_deref().unwrap_or("text-only");
        html! {
            section.bio-module data-layout=(layout) {
                @if let Some(text) = &module.text {
                    div.bio-text { (markdown(text)) }
                }
                @for media in &module.images {
                    figure.bio-image {
                        (self.image(media, DETAIL_WIDTH, module.image_caption.as_deref().unwrap_or("")))
                        @if let Some(caption) = &module.image_caption {
                            figcaption { (caption) }
                        }
                    }
                }
            }
        }
    }

    /// The not-found page, e.g. "No works found.".
    pub fn not_found_page(&self, current_path: &str, message: &str, marquee: Option<&str>) -> Markup {
        let content = html! {
            main.not-found {
                h1 { "Not found" }
                p { (message) }
                a href="/" { "Back to the home page" }
            }
        };
        self.document(Some("Not found"), current_path, marquee, content)
    }
}

// ============================================================================
// Free components
// ============================================================================

fn is_current(path: &str, current_path: &str) -> bool {
    current_path == path || current_path.starts_with(&format!("{path}/"))
}

fn render_marquee(text: &str) -> Markup {
    html! {
        div.marquee aria-live="off" {
            span.marquee-text { (text) }
        }
    }
}

/// Convert markdown text to HTML.
fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

fn detail_href(kind: ContentKind, slug: Option<&str>) -> Option<String> {
    slug.map(|s| format!("{}/{}", kind.path(), s))
}

/// A link to the item's detail page, or an inert placeholder without a slug.
fn item_link(href: Option<String>, body: Markup) -> Markup {
    html! {
        @if let Some(href) = href {
            a.item-link href=(href) { (body) }
        } @else {
            span.item-link.disabled aria-disabled="true" { (body) }
        }
    }
}

fn page_state_message<T>(kind: ContentKind, page: &PageState<T>) -> Markup {
    html! {
        @match page {
            PageState::Loading => p.page-state.loading { "Loading…" },
            PageState::Empty => div.page-state.empty {
                p { "No " (kind.slug()) " match these filters." }
                a href=(kind.path()) { "Show all" }
            },
            PageState::Populated(_) => {},
        }
    }
}

/// Values offered for a filtering dimension.
fn options<T>(view: &ListingView<T>, dim: Dimension) -> Vec<(String, String)> {
    match dim {
        Dimension::Year => view.years.iter().map(|y| (y.clone(), y.clone())).collect(),
        Dimension::Classification => view
            .tags
            .iter()
            .map(|t| (t.clone(), tag_label(t)))
            .collect(),
        Dimension::Status => vec![
            ("current".to_string(), "Current".to_string()),
            ("past".to_string(), "Past".to_string()),
        ],
        Dimension::Format => vec![
            ("solo".to_string(), "Solo".to_string()),
            ("group".to_string(), "Group".to_string()),
        ],
        Dimension::View => Vec::new(),
    }
}

fn filter_group(path: &str, state: &FilterState, dim: Dimension, options: &[(String, String)]) -> Markup {
    let all_active = state.is_active(dim, dim.identity());
    html! {
        ul.filter-group data-dimension=(dim.param()) {
            li {
                a.filter-option.active[all_active] href=(state.cleared(dim).href(path)) { "All" }
            }
            @for (value, label) in options {
                @let active = state.is_active(dim, value);
                li {
                    a.filter-option.active[active] href=(state.toggled(dim, value).href(path)) { (label) }
                }
            }
        }
    }
}

fn view_switch(path: &str, state: &FilterState) -> Markup {
    let grid = state.cleared(Dimension::View);
    let list = grid.toggled(Dimension::View, ViewMode::List.as_str());
    let mode = state.view_mode();
    html! {
        ul.view-switch data-dimension=(Dimension::View.param()) {
            li { a.filter-option.active[mode == ViewMode::Grid] href=(grid.href(path)) { "Grid" } }
            li { a.filter-option.active[mode == ViewMode::List] href=(list.href(path)) { "List" } }
        }
    }
}

fn work_row(work: &Work) -> Markup {
    let body = html! {
        span.row-year { (or_placeholder(work.year.as_deref())) }
        span.row-title { (display_title(work.title.as_deref())) }
        span.row-meta { (or_placeholder(work.classification.as_deref().map(tag_label).as_deref())) }
    };
    html! {
        li.row data-id=(work.id) {
            (item_link(detail_href(ContentKind::Works, work.slug.as_deref()), body))
        }
    }
}

fn exhibition_row(exhibition: &Exhibition) -> Markup {
    let format = match exhibition.is_solo {
        Some(true) => "Solo",
        _ => "Group",
    };
    let body = html! {
        span.row-year { (labels::format_date(exhibition.date.as_deref())) }
        span.row-title { (display_title(exhibition.title.as_deref())) }
        span.row-meta { (or_placeholder(exhibition.location.as_deref())) }
        span.row-format { (format) }
    };
    html! {
        li.row data-id=(exhibition.id) {
            (item_link(detail_href(ContentKind::Exhibitions, exhibition.slug.as_deref()), body))
        }
    }
}

fn collection_row(collection: &Collection) -> Markup {
    let body = html! {
        span.row-year { (collection.year_key().label()) }
        span.row-title { (display_title(collection.title.as_deref())) }
        span.row-meta { (or_placeholder(collection.location.as_deref())) }
    };
    html! {
        li.row data-id=(collection.id) {
            (item_link(detail_href(ContentKind::Collections, collection.slug.as_deref()), body))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{ListingPolicy, SortOrder};
    use crate::test_helpers::*;

    fn renderer() -> Renderer {
        Renderer::new(&SiteConfig::default())
    }

    fn works_view(items: &[Work], query: &str) -> ListingView<Work> {
        let policy = ListingPolicy::new(ContentKind::Works, SortOrder::Year, true);
        let state = FilterState::initialize(Some(query), ContentKind::Works.dimensions());
        ListingView::build(ContentKind::Works, Some(items), state, &policy)
    }

    fn sample_works() -> Vec<Work> {
        vec![
            work("1", Some("2021"), Some("paintings")),
            work("2", Some("2023"), Some("drawings")),
            work("3", None, Some("paintings")),
        ]
    }

    #[test]
    fn document_includes_doctype_and_title() {
        let html = renderer()
            .not_found_page("/", "Nothing here.", None)
            .into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Not found | Portfolio</title>"));
        assert!(html.contains("--color-bg"));
    }

    #[test]
    fn nav_marks_current_section() {
        let html = renderer()
            .work_page(&work("1", None, None), None)
            .into_string();
        assert!(html.contains(r#"<li class="current"><a href="/works" aria-current="page">"#));
        assert!(!html.contains(r#"<li class="current"><a href="/exhibitions""#));
    }

    #[test]
    fn marquee_is_optional() {
        let r = renderer();
        let with = r.biography_page(None, Some("Now showing")).into_string();
        let without = r.biography_page(None, None).into_string();
        assert!(with.contains("marquee"));
        assert!(with.contains("Now showing"));
        assert!(!without.contains(r#"class="marquee""#));
    }

    #[test]
    fn unfiltered_works_render_as_strip_with_scroll_key() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), ""), None)
            .into_string();
        assert!(html.contains(r#"data-scroll-key="works-scroll-all-all""#));
        assert!(html.contains(r#"src="/scroll.js""#));
    }

    #[test]
    fn classification_filter_keeps_the_strip_with_its_own_key() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), "classification=paintings"), None)
            .into_string();
        assert!(html.contains(r#"data-scroll-key="works-scroll-all-paintings""#));
        assert!(html.contains(r#"src="/scroll.js""#));
        assert!(!html.contains("data-year="));
    }

    #[test]
    fn selected_year_gets_a_headed_strip() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), "year=2021"), None)
            .into_string();
        assert!(html.contains(r#"data-year="2021""#));
        assert!(html.contains(r#"data-scroll-key="works-scroll-2021-all""#));
    }

    #[test]
    fn filtered_list_view_renders_year_sections() {
        let html = renderer()
            .works_page(
                &works_view(&sample_works(), "classification=paintings&view=list"),
                None,
            )
            .into_string();
        assert!(!html.contains("data-scroll-key"));
        let y2021 = html.find(r#"data-year="2021""#).unwrap();
        let unknown = html.find(r#"data-year="Unknown""#).unwrap();
        assert!(y2021 < unknown);
        assert!(!html.contains(r#"data-year="2023""#));
    }

    #[test]
    fn list_view_renders_rows() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), "view=list"), None)
            .into_string();
        assert!(html.contains(r#"<ul class="list">"#));
        assert!(html.contains("row-title"));
    }

    #[test]
    fn filter_links_point_at_toggled_state() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), "year=2023"), None)
            .into_string();
        // Clicking the active year deselects it.
        assert!(html.contains(r#"<a class="filter-option active" href="/works">2023</a>"#));
        // Other options combine with the current selection.
        assert!(html.contains(r#"href="/works?year=2023&amp;classification=paintings""#));
        assert!(html.contains(r#"href="/works?year=2021""#));
    }

    #[test]
    fn all_option_is_active_without_selection() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), ""), None)
            .into_string();
        assert!(html.contains(r#"<a class="filter-option active" href="/works">All</a>"#));
        assert!(html.contains("Paintings"));
    }

    #[test]
    fn view_switch_keeps_filters() {
        let html = renderer()
            .works_page(&works_view(&sample_works(), "year=2021"), None)
            .into_string();
        assert!(html.contains(r#"href="/works?year=2021&amp;view=list""#));
    }

    #[test]
    fn empty_state_is_distinct_from_loading() {
        let r = renderer();
        let empty = r
            .works_page(&works_view(&sample_works(), "classification=sculpture"), None)
            .into_string();
        assert!(empty.contains("No works match these filters."));
        assert!(!empty.contains("Loading"));

        let policy = ListingPolicy::new(ContentKind::Works, SortOrder::Year, true);
        let loading = ListingView::<Work>::build(ContentKind::Works, None, FilterState::new(), &policy);
        let html = r.works_page(&loading, None).into_string();
        assert!(html.contains("Loading…"));
    }

    #[test]
    fn missing_fields_degrade() {
        let mut item = work("1", None, None);
        item.title = None;
        item.slug = None;
        let html = renderer()
            .works_page(&works_view(&[item], "view=list"), None)
            .into_string();
        assert!(html.contains("Untitled"));
        assert!(html.contains(labels::PLACEHOLDER));
        assert!(html.contains(r#"aria-disabled="true""#));
    }

    #[test]
    fn exhibition_filters_and_detail() {
        let items = vec![exhibition("tides", Some("2024-03-01"), Some(true), Some(true))];
        let policy = ListingPolicy::new(ContentKind::Exhibitions, SortOrder::Year, false);
        let view = ListingView::build(ContentKind::Exhibitions, Some(&items), FilterState::new(), &policy);
        let r = renderer();
        let html = r.exhibitions_page(&view, None).into_string();
        assert!(html.contains(r#"href="/exhibitions?status=current""#));
        assert!(html.contains(r#"href="/exhibitions?format=solo""#));
        assert!(html.contains(r#"href="/exhibitions/tides""#));

        let detail = r.exhibition_page(&items[0], None).into_string();
        assert!(detail.contains("March 1, 2024"));
        assert!(detail.contains("Solo exhibition"));
    }

    #[test]
    fn publications_link_targets() {
        let mut linked = publication("p1", Some("2024"), &["catalogue"]);
        linked.link = Some("https://example.com/cat".to_string());
        let plain = publication("p2", None, &["press"]);
        let items = vec![linked, plain];
        let policy = ListingPolicy::new(ContentKind::Publications, SortOrder::Source, false);
        let view = ListingView::build(ContentKind::Publications, Some(&items), FilterState::new(), &policy);
        let html = renderer()
            .publications_page(&view, Some("Selected *writing*."), None)
            .into_string();
        assert!(html.contains(r#"href="https://example.com/cat""#));
        assert!(html.contains(r#"<span class="publication-title">Publication p2</span>"#));
        assert!(html.contains("<em>writing</em>"));
        assert!(html.contains(r#"href="/publications?classification=catalogue""#));
        assert!(!html.contains(r#"class="view-switch""#));
    }

    #[test]
    fn work_detail_renders_markdown_and_facts() {
        let mut item = work("1", Some("2023"), Some("object-images"));
        item.description = Some("Painted **slowly**.".to_string());
        item.size = Some("40 x 30 cm".to_string());
        let html = renderer().work_page(&item, None).into_string();
        assert!(html.contains("<strong>slowly</strong>"));
        assert!(html.contains("Object Images"));
        assert!(html.contains("40 x 30 cm"));
        assert!(html.contains("<title>Work 1 | Portfolio</title>"));
    }

    #[test]
    fn biography_contact_links_from_config() {
        let mut config = SiteConfig::default();
        config.site.contact_email = "studio@example.com".to_string();
        let html = Renderer::new(&config).biography_page(None, None).into_string();
        assert!(html.contains(r#"href="mailto:studio@example.com""#));
        assert!(!html.contains("Instagram"));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut item = work("1", Some("2023"), None);
        item.title = Some("<script>alert('xss')</script>".to_string());
        let html = renderer().work_page(&item, None).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
