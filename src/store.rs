//! Content store adapter.
//!
//! Reads the JSON documents exported from the content store. Each content
//! type lives in its own document in the content directory:
//!
//! ```text
//! content/
//! ├── home.json           # singleton: title, marquee, gallery, biography
//! ├── works.json          # flat array, or bucketed by year and classification
//! ├── exhibitions.json
//! ├── collections.json
//! └── publications.json   # array, or {"publications": [...]}
//! ```
//!
//! ## Bucketed works
//!
//! The works query returns works grouped twice over, so the same work shows up
//! once under its year and once under its classification:
//!
//! ```json
//! {
//!   "years": {"2023": [{"_id": "a", ...}], "2021": [...]},
//!   "classifications": {"paintings": [{"_id": "a", ...}]}
//! }
//! ```
//!
//! Buckets are concatenated (years newest first, then classifications
//! alphabetically) and a missing `year`/`classification` on an item is filled
//! from its bucket key. Duplicates are left for the listing pipeline to drop.
//!
//! ## Failure handling
//!
//! A missing, empty, `null`, unreadable, or malformed document is
//! [`Fetched::Missing`]: the page shows its not-found state. Inside a document,
//! every element is decoded on its own; elements that don't decode are logged,
//! counted in the [`LoadReport`], and skipped.

use crate::types::{Collection, Exhibition, Home, Publication, Work, YearKey};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{document}: {source}")]
    Json {
        document: String,
        source: serde_json::Error,
    },
}

/// Outcome of a fetch. Absence is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    Missing,
}

impl<T> Fetched<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Fetched::Missing)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Found(value) => Fetched::Found(f(value)),
            Fetched::Missing => Fetched::Missing,
        }
    }
}

/// How many elements of a document decoded, and how many were skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// The decoded elements of a collection document.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub report: LoadReport,
}

/// A directory of exported content documents.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a content directory, failing if it isn't a readable directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let meta = tokio::fs::metadata(&root).await?;
        if !meta.is_dir() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn works(&self) -> Fetched<Loaded<Work>> {
        self.fetch("works.json")
            .await
            .map(|doc| decode_elements("works.json", works_elements(doc)))
    }

    pub async fn exhibitions(&self) -> Fetched<Loaded<Exhibition>> {
        self.fetch("exhibitions.json")
            .await
            .map(|doc| decode_elements("exhibitions.json", elements(doc)))
    }

    /// Every collection, private ones included.
    pub async fn collections(&self) -> Fetched<Loaded<Collection>> {
        self.fetch("collections.json")
            .await
            .map(|doc| decode_elements("collections.json", elements(doc)))
    }

    pub async fn publications(&self) -> Fetched<Loaded<Publication>> {
        self.fetch("publications.json").await.map(|doc| {
            let doc = match doc {
                Value::Object(mut map) if map.contains_key("publications") => {
                    map.remove("publications").unwrap_or(Value::Null)
                }
                other => other,
            };
            let mut loaded: Loaded<Publication> = decode_elements("publications.json", elements(doc));
            for (index, publication) in loaded.items.iter_mut().enumerate() {
                publication.assign_id(index);
            }
            loaded
        })
    }

    pub async fn home(&self) -> Fetched<Home> {
        let Fetched::Found(doc) = self.fetch("home.json").await else {
            return Fetched::Missing;
        };
        match serde_json::from_value(doc) {
            Ok(home) => Fetched::Found(home),
            Err(e) => {
                tracing::warn!(document = "home.json", error = %e, "home document does not decode");
                Fetched::Missing
            }
        }
    }

    /// The shared marquee text, if the home document has one.
    pub async fn marquee(&self) -> Option<String> {
        self.home()
            .await
            .found()
            .and_then(|home| home.marquee_text)
            .filter(|text| !text.trim().is_empty())
    }

    pub async fn work(&self, slug: &str) -> Fetched<Work> {
        let works = self.works().await;
        by_slug(works, slug, |w| w.slug.as_deref())
    }

    pub async fn exhibition(&self, slug: &str) -> Fetched<Exhibition> {
        let exhibitions = self.exhibitions().await;
        by_slug(exhibitions, slug, |e| e.slug.as_deref())
    }

    pub async fn collection(&self, slug: &str) -> Fetched<Collection> {
        let collections = self.collections().await;
        by_slug(collections, slug, |c| c.slug.as_deref())
    }

    async fn fetch(&self, document: &str) -> Fetched<Value> {
        match self.read_document(document).await {
            Ok(Some(value)) => Fetched::Found(value),
            Ok(None) => {
                tracing::warn!(document, "document not found");
                Fetched::Missing
            }
            Err(e) => {
                tracing::warn!(document, error = %e, "document unreadable");
                Fetched::Missing
            }
        }
    }

    /// Raw document. `Ok(None)` when the file is absent, empty, or `null`.
    pub async fn read_document(&self, document: &str) -> Result<Option<Value>, StoreError> {
        let path = self.root.join(document);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            document: document.to_string(),
            source,
        })?;
        Ok(Some(value).filter(|v| !v.is_null()))
    }
}

fn by_slug<T>(
    fetched: Fetched<Loaded<T>>,
    slug: &str,
    slug_of: impl Fn(&T) -> Option<&str>,
) -> Fetched<T> {
    let Fetched::Found(loaded) = fetched else {
        return Fetched::Missing;
    };
    match loaded.items.into_iter().find(|item| slug_of(item) == Some(slug)) {
        Some(item) => Fetched::Found(item),
        None => {
            tracing::debug!(slug, "no item with slug");
            Fetched::Missing
        }
    }
}

/// Array elements of a collection document. A lone object counts as one.
fn elements(doc: Value) -> Vec<Value> {
    match doc {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Flatten a works document, flat or bucketed.
fn works_elements(doc: Value) -> Vec<Value> {
    let Value::Object(mut map) = doc else {
        return elements(doc);
    };
    if !map.contains_key("years") && !map.contains_key("classifications") {
        return elements(Value::Object(map));
    }

    let mut out = Vec::new();
    if let Some(Value::Object(years)) = map.remove("years") {
        let mut buckets: Vec<(String, Value)> = years.into_iter().collect();
        buckets.sort_by_cached_key(|(key, _)| YearKey::from_year(Some(key.as_str())));
        for (key, bucket) in buckets {
            out.extend(fill_from_bucket(bucket, "year", &key));
        }
    }
    if let Some(Value::Object(classes)) = map.remove("classifications") {
        let mut buckets: Vec<(String, Value)> = classes.into_iter().collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, bucket) in buckets {
            out.extend(fill_from_bucket(bucket, "classification", &key));
        }
    }
    out
}

fn fill_from_bucket(bucket: Value, field: &str, key: &str) -> Vec<Value> {
    elements(bucket)
        .into_iter()
        .map(|item| match item {
            Value::Object(mut obj) => {
                fill_missing(&mut obj, field, key);
                Value::Object(obj)
            }
            other => other,
        })
        .collect()
}

fn fill_missing(obj: &mut Map<String, Value>, field: &str, key: &str) {
    let missing = obj.get(field).is_none_or(Value::is_null);
    if missing {
        obj.insert(field.to_string(), Value::String(key.to_string()));
    }
}

/// Decode each element on its own, skipping the ones that don't fit `T`.
pub fn decode_elements<T: DeserializeOwned>(document: &str, values: Vec<Value>) -> Loaded<T> {
    let mut report = LoadReport::default();
    let mut items = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(item) => {
                report.loaded += 1;
                items.push(item);
            }
            Err(e) => {
                report.skipped += 1;
                tracing::warn!(document, index, error = %e, "skipping malformed item");
            }
        }
    }
    Loaded { items, report }
}
