//! Shared test utilities for the folio test suite.
//!
//! Provides content fixtures on disk and small builders for content items, so
//! pipeline tests can state only the fields they care about.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = vec![
//!     work("1", Some("2022"), Some("paintings")),
//!     work("2", Some("2023"), Some("drawings")),
//! ];
//! let derived = derive(&items, &FilterState::new(), &policy);
//! assert_eq!(ids(&derived), vec!["2", "1"]);
//!
//! let tmp = setup_fixtures();
//! let store = ContentStore::new(tmp.path());
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::listing::Listable;
use crate::types::{Collection, Exhibition, Media, Publication, Work};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// A content directory holding exactly the given documents.
pub fn write_content(documents: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, body) in documents {
        std::fs::write(tmp.path().join(name), body).unwrap();
    }
    tmp
}

// =========================================================================
// Item builders
// =========================================================================

pub fn image(url: &str) -> Media {
    Media {
        url: Some(url.to_string()),
        ..Media::default()
    }
}

/// A work with one image.
pub fn work(id: &str, year: Option<&str>, classification: Option<&str>) -> Work {
    Work {
        id: id.to_string(),
        title: Some(format!("Work {id}")),
        slug: Some(format!("work-{id}")),
        images: vec![image(&format!("https://images.example.com/{id}.jpg"))],
        year: year.map(str::to_string),
        classification: classification.map(str::to_string),
        size: None,
        location: None,
        description_medium: None,
        description: None,
        publications: Vec::new(),
    }
}

pub fn exhibition(
    id: &str,
    date: Option<&str>,
    is_current: Option<bool>,
    is_solo: Option<bool>,
) -> Exhibition {
    Exhibition {
        id: id.to_string(),
        title: Some(format!("Exhibition {id}")),
        slug: Some(id.to_string()),
        date: date.map(str::to_string),
        end_date: None,
        is_current,
        is_solo,
        short_description: None,
        description: None,
        location: None,
        photo_credits: None,
        assigned_works: Vec::new(),
        exhibition_photos: Vec::new(),
    }
}

pub fn collection(id: &str, title: Option<&str>, date: Option<&str>) -> Collection {
    Collection {
        id: id.to_string(),
        title: title.map(str::to_string),
        slug: Some(id.to_string()),
        date: date.map(str::to_string),
        is_private: None,
        short_description: None,
        description: None,
        location: None,
        assigned_works: Vec::new(),
        collection_photos: Vec::new(),
    }
}

pub fn publication(id: &str, year: Option<&str>, types: &[&str]) -> Publication {
    Publication {
        id: id.to_string(),
        key: None,
        title: Some(format!("Publication {id}")),
        publication_types: types.iter().map(|t| t.to_string()).collect(),
        images: Vec::new(),
        year: year.map(str::to_string),
        description: None,
        file: None,
        link: None,
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Ids in listing order.
pub fn ids<T: Listable>(items: &[T]) -> Vec<&str> {
    items.iter().map(Listable::id).collect()
}
