//! Horizontal scroll persistence for the works strip.
//!
//! The strip view remembers how far the visitor scrolled for each filter
//! combination, for the length of the browsing session. Offsets are stored in
//! session-scoped key-value storage under a key built from the page and its
//! year/classification selection; the view mode doesn't affect the key.
//!
//! The server only builds keys: the rendered strip carries its key in a
//! `data-scroll-key` attribute and `static/scroll.js` reads and writes
//! `sessionStorage`. The live offsets never reach the server.
//!
//! [`ScrollStore`] and [`SessionScrollStore`] model the script's contract in
//! Rust: save per key, restore 0 for an unknown key, forget everything when
//! the session ends. Their tests pin that behavior alongside the key format
//! the renderer emits.

use crate::filter::{Dimension, FilterState};
use crate::listing::ContentKind;
use std::collections::HashMap;

/// Storage key for a page's scroll offset under the given filter selection.
///
/// ```text
/// works, {}                              → works-scroll-all-all
/// works, {year: 2023}                    → works-scroll-2023-all
/// works, {year: 2023, class: paintings}  → works-scroll-2023-paintings
/// ```
pub fn scroll_key(kind: ContentKind, state: &FilterState) -> String {
    format!(
        "{}-scroll-{}-{}",
        kind.slug(),
        state.get(Dimension::Year),
        state.get(Dimension::Classification)
    )
}

/// Session-scoped key-value storage for scroll offsets.
pub trait ScrollStore {
    fn save(&mut self, key: &str, offset: u32);

    /// Saved offset, or 0 (start of the strip) when nothing was saved.
    fn restore(&self, key: &str) -> u32;
}

/// In-memory [`ScrollStore`] for one browsing session.
#[derive(Debug, Default)]
pub struct SessionScrollStore {
    offsets: HashMap<String, u32>,
}

impl SessionScrollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// End of session: forget every offset.
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}

impl ScrollStore for SessionScrollStore {
    fn save(&mut self, key: &str, offset: u32) {
        self.offsets.insert(key.to_string(), offset);
    }

    fn restore(&self, key: &str) -> u32 {
        self.offsets.get(key).copied().unwrap_or(0)
    }
}
