//! The derivation pipeline shared by every listing page.
//!
//! A listing page is a pure function of the fetched content and the page's
//! [`FilterState`]. The pipeline runs in a fixed order:
//!
//! ```text
//! items ─▶ media check ─▶ predicate filter ─▶ dedupe by id ─▶ sort ─▶ (group by year)
//! ```
//!
//! 1. **Media check**: listings that show images drop items with no usable media.
//! 2. **Predicate filter**: every active dimension the page recognizes must
//!    match (logical AND). Dimensions the page doesn't recognize are ignored.
//! 3. **Dedupe**: the same item can arrive through several source buckets
//!    (a year bucket and a classification bucket); the first occurrence wins
//!    and keeps its position.
//! 4. **Sort**: stable, per-content-type policy ([`SortOrder`]).
//! 5. **Group**: optional, by [`YearKey`] in display order, `Unknown` last.
//!
//! Nothing is cached or mutated. Running the pipeline twice on the same input
//! gives the same output, and an empty result is an ordinary value, distinct
//! from "not loaded yet" ([`PageState::Loading`]).

use crate::filter::{Dimension, FilterState};
use crate::labels;
use crate::types::{Collection, Exhibition, Publication, Work, YearKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

// ============================================================================
// Listable
// ============================================================================

/// What the pipeline needs to know about a content item.
pub trait Listable {
    /// Stable unique identifier used for deduplication.
    fn id(&self) -> &str;

    fn title(&self) -> Option<&str>;

    /// Year used for sorting, grouping, and the `year` dimension.
    fn year_key(&self) -> YearKey;

    /// Number of media references that point at something.
    fn media_count(&self) -> usize;

    /// Tags this item carries for `dim` (used to build filter controls).
    fn tags(&self, _dim: Dimension) -> Vec<&str> {
        Vec::new()
    }

    /// Whether this item matches `value` on `dim`.
    ///
    /// The default handles `Year` by label equality and tag dimensions by
    /// membership. Boolean dimensions are handled by the types that have them.
    fn matches(&self, dim: Dimension, value: &str) -> bool {
        match dim {
            Dimension::Year => self.year_key().label() == value,
            Dimension::View => true,
            _ => self.tags(dim).iter().any(|t| labels::same_tag(t, value)),
        }
    }
}

impl Listable for Work {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn year_key(&self) -> YearKey {
        YearKey::from_year(self.year.as_deref())
    }

    fn media_count(&self) -> usize {
        self.images.iter().filter(|m| m.has_source()).count()
    }

    fn tags(&self, dim: Dimension) -> Vec<&str> {
        match dim {
            Dimension::Classification => self.classification.as_deref().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl Listable for Exhibition {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn year_key(&self) -> YearKey {
        YearKey::from_date(self.date.as_deref())
    }

    fn media_count(&self) -> usize {
        self.exhibition_photos.iter().filter(|m| m.has_source()).count()
    }

    fn matches(&self, dim: Dimension, value: &str) -> bool {
        match (dim, value) {
            (Dimension::Status, "current") => self.is_current == Some(true),
            // Only exhibitions explicitly marked as not current count as past.
            (Dimension::Status, "past") => self.is_current == Some(false),
            (Dimension::Format, "solo") => self.is_solo == Some(true),
            (Dimension::Format, "group") => self.is_solo != Some(true),
            (Dimension::Status | Dimension::Format, _) => false,
            (Dimension::Year, _) => self.year_key().label() == value,
            _ => true,
        }
    }
}

impl Listable for Collection {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn year_key(&self) -> YearKey {
        YearKey::from_date(self.date.as_deref())
    }

    fn media_count(&self) -> usize {
        self.collection_photos.iter().filter(|m| m.has_source()).count()
    }
}

impl Listable for Publication {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn year_key(&self) -> YearKey {
        YearKey::from_year(self.year.as_deref())
    }

    fn media_count(&self) -> usize {
        self.images.iter().filter(|m| m.has_source()).count()
    }

    fn tags(&self, dim: Dimension) -> Vec<&str> {
        match dim {
            Dimension::Classification => self.publication_types.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Policy
// ============================================================================

/// The four listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Works,
    Exhibitions,
    Collections,
    Publications,
}

impl ContentKind {
    pub const EVERY: [ContentKind; 4] = [
        ContentKind::Works,
        ContentKind::Exhibitions,
        ContentKind::Collections,
        ContentKind::Publications,
    ];

    /// URL segment and document name (`works` → `/works`, `works.json`).
    pub fn slug(self) -> &'static str {
        match self {
            ContentKind::Works => "works",
            ContentKind::Exhibitions => "exhibitions",
            ContentKind::Collections => "collections",
            ContentKind::Publications => "publications",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Works => "Works",
            ContentKind::Exhibitions => "Exhibitions",
            ContentKind::Collections => "Collections",
            ContentKind::Publications => "Publications",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.slug())
    }

    /// Dimensions this page reads from its URL.
    pub fn dimensions(self) -> &'static [Dimension] {
        match self {
            ContentKind::Works => &[Dimension::Year, Dimension::Classification, Dimension::View],
            ContentKind::Exhibitions => &[
                Dimension::Year,
                Dimension::Status,
                Dimension::Format,
                Dimension::View,
            ],
            ContentKind::Collections => &[Dimension::Year, Dimension::View],
            ContentKind::Publications => &[Dimension::Classification],
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest year first; free-text and missing years after all numeric ones.
    Year,
    /// Case-insensitive title, "Untitled" for missing titles.
    Title,
    /// Keep the order the store returned.
    Source,
}

/// Per-content-type pipeline parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPolicy {
    pub dimensions: &'static [Dimension],
    pub sort: SortOrder,
    pub require_media: bool,
}

impl ListingPolicy {
    pub fn new(kind: ContentKind, sort: SortOrder, require_media: bool) -> Self {
        Self {
            dimensions: kind.dimensions(),
            sort,
            require_media,
        }
    }

    fn recognizes(&self, dim: Dimension) -> bool {
        self.dimensions.contains(&dim)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the pipeline: media check, filter, dedupe, sort.
pub fn derive<'a, T, I>(items: I, state: &FilterState, policy: &ListingPolicy) -> Vec<T>
where
    T: Listable + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    let mut derived: Vec<T> = items
        .into_iter()
        .filter(|item| !policy.require_media || item.media_count() > 0)
        .filter(|item| passes(*item, state, policy))
        .filter(|item| seen.insert(item.id().to_string()))
        .cloned()
        .collect();
    sort_items(&mut derived, policy.sort);
    derived
}

fn passes<T: Listable>(item: &T, state: &FilterState, policy: &ListingPolicy) -> bool {
    state
        .active_filters()
        .filter(|(dim, _)| policy.recognizes(*dim))
        .all(|(dim, value)| item.matches(dim, value))
}

/// Stable in-place sort by `order`.
pub fn sort_items<T: Listable>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Year => items.sort_by_cached_key(|item| item.year_key()),
        SortOrder::Title => items
            .sort_by_cached_key(|item| labels::display_title(item.title()).to_lowercase()),
        SortOrder::Source => {}
    }
}

/// A year section of a grouped listing.
#[derive(Debug, PartialEq)]
pub struct YearGroup<'a, T> {
    pub key: YearKey,
    pub items: Vec<&'a T>,
}

/// Bucket items by year in display order. Items keep their relative order.
pub fn group_by_year<T: Listable>(items: &[T]) -> Vec<YearGroup<'_, T>> {
    let mut buckets: BTreeMap<YearKey, Vec<&T>> = BTreeMap::new();
    for item in items {
        buckets.entry(item.year_key()).or_default().push(item);
    }
    buckets
        .into_iter()
        .map(|(key, items)| YearGroup { key, items })
        .collect()
}

/// Distinct numeric years present, newest first.
pub fn facet_years<'a, T, I>(items: I) -> Vec<String>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(Listable::year_key)
        .filter(YearKey::is_numeric)
        .collect::<BTreeSet<_>>()
        .iter()
        .map(YearKey::label)
        .collect()
}

/// Distinct tags for `dim`, sorted.
pub fn facet_tags<'a, T, I>(items: I, dim: Dimension) -> Vec<String>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .flat_map(|item| item.tags(dim))
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Page state
// ============================================================================

/// The three observable states of a listing page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    /// Content not fetched yet.
    Loading,
    /// Fetched, nothing left after filtering.
    Empty,
    /// Fetched, at least one item.
    Populated(Vec<T>),
}

impl<T> PageState<T> {
    /// `None` means the fetch hasn't resolved.
    pub fn resolve(derived: Option<Vec<T>>) -> Self {
        match derived {
            None => PageState::Loading,
            Some(items) if items.is_empty() => PageState::Empty,
            Some(items) => PageState::Populated(items),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            PageState::Populated(items) => items,
            _ => &[],
        }
    }
}

/// Everything a listing renderer needs: the derived items plus the facets
/// computed over the unfiltered collection.
#[derive(Debug, Clone)]
pub struct ListingView<T> {
    pub kind: ContentKind,
    pub state: FilterState,
    pub page: PageState<T>,
    pub years: Vec<String>,
    pub tags: Vec<String>,
}

impl<T: Listable + Clone> ListingView<T> {
    /// Derive the view for `source` (`None` while not loaded).
    pub fn build(
        kind: ContentKind,
        source: Option<&[T]>,
        state: FilterState,
        policy: &ListingPolicy,
    ) -> Self {
        let Some(items) = source else {
            return Self {
                kind,
                state,
                page: PageState::Loading,
                years: Vec::new(),
                tags: Vec::new(),
            };
        };
        let unfiltered = derive(items, &FilterState::new(), policy);
        let years = facet_years(&unfiltered);
        let tags = facet_tags(&unfiltered, Dimension::Classification);
        let derived = derive(items, &state, policy);
        Self {
            kind,
            state,
            page: PageState::resolve(Some(derived)),
            years,
            tags,
        }
    }
}
