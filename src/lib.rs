//! # Folio
//!
//! A content-driven portfolio website for a visual artist: biography, works,
//! exhibitions, collections, and publications. Content is exported from a
//! headless content store as JSON documents; pages are rendered on the server
//! with compile-time templates.
//!
//! # Architecture: One Listing Controller, Four Listings
//!
//! Every listing page (works, exhibitions, collections, publications) runs
//! through the same three parts:
//!
//! ```text
//! URL query  ─▶  FilterState  ─▶  derive(items, state, policy)  ─▶  render
//!   ▲                                                                 │
//!   └──────────── filter links point at the toggled state ◀──────────┘
//! ```
//!
//! 1. **Filter state** ([`filter`]): the active selection per dimension, read
//!    from and written to the query string. The URL is the only copy.
//! 2. **Derivation** ([`listing`]): a pure pipeline (media check, filter,
//!    dedupe, sort, optional year grouping) parameterized per content type.
//! 3. **Rendering** ([`render`]): grid, list, year sections, or a horizontal
//!    strip, plus the filter controls. No business logic.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Content model and lenient decoding of store documents |
//! | [`labels`] | Display fallbacks: "Untitled", em-dash, tag labels, dates |
//! | [`assets`] | Asset reference → CDN URL resolution |
//! | [`filter`] | `FilterState`: URL-synced filter selection |
//! | [`listing`] | Derivation pipeline, listing policies, page states |
//! | [`scroll`] | Strip scroll-offset keys and session store |
//! | [`store`] | Content directory adapter (`tokio::fs`), bucketed works |
//! | [`render`] | Maud templates for every page |
//! | [`site`] | Route → fetch → derive → render |
//! | [`serve`] | axum router and server lifecycle |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `check` |
//!
//! # Design Decisions
//!
//! ## Links, Not Handlers
//!
//! Filter controls are plain links to the URL of the state they produce.
//! Clicking one is a request for that URL, so pages are shareable, reloadable,
//! and work without JavaScript. The only script on the site persists the
//! works strip's scroll offset.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed templates are build errors, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Lenient Content, Strict Config
//!
//! Content comes from editors and is decoded leniently: single objects where
//! arrays were expected, numeric years, missing fields. A malformed item is
//! logged and skipped, a missing document renders a not-found page.
//! Configuration comes from the site owner and is strict: unknown keys and
//! out-of-range values are errors at startup.

pub mod assets;
pub mod config;
pub mod filter;
pub mod labels;
pub mod listing;
pub mod output;
pub mod render;
pub mod scroll;
pub mod serve;
pub mod site;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
