//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's file, which only needs the keys it changes.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the content directory by default, next to the JSON
//! documents exported from the content store:
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── home.json
//! ├── works.json
//! ├── exhibitions.json
//! ├── collections.json
//! └── publications.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! artist = ""
//! contact_email = ""
//! instagram = ""
//!
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [assets]
//! image_base_url = ""      # CDN base for image asset references
//! file_base_url = ""       # CDN base for file asset references
//! quality = 85             # Image quality requested from the CDN (0-100)
//!
//! [listings.works]
//! sort = "year"            # year | title | source
//! require_media = true     # Hide items without a displayable image
//! grouped = true           # Show year sections when a filter is active
//!
//! [listings.exhibitions]
//! sort = "year"
//! require_media = false
//! grouped = true
//!
//! [listings.collections]
//! sort = "title"
//! require_media = false
//! grouped = true
//!
//! [listings.publications]
//! sort = "source"
//! require_media = false
//! grouped = false
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::listing::{ContentKind, ListingPolicy, SortOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults; unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and contact links.
    pub site: SiteInfo,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Asset CDN settings.
    pub assets: AssetsConfig,
    /// Per-listing pipeline settings.
    pub listings: ListingsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.quality > 100 {
            return Err(ConfigError::Validation(
                "assets.quality must be 0-100".into(),
            ));
        }
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.bind must not be empty".into(),
            ));
        }
        self.server.bind_addr()?;
        Ok(())
    }

    /// Pipeline policy for a listing page.
    pub fn policy(&self, kind: ContentKind) -> ListingPolicy {
        let listing = self.listings.get(kind);
        ListingPolicy::new(kind, listing.sort, listing.require_media)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Shown in the header and the `<title>` of every page.
    pub title: String,
    /// Artist name, appended to detail page titles when set.
    pub artist: String,
    /// `mailto:` target on the biography page. Empty hides the link.
    pub contact_email: String,
    /// Instagram profile URL on the biography page. Empty hides the link.
    pub instagram: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            artist: String::new(),
            contact_email: String::new(),
            instagram: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.trim().parse().map_err(|e| {
            ConfigError::Validation(format!("server.bind '{}' is not an address: {e}", self.bind))
        })
    }
}

/// Where asset references resolve to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Base URL for `image-…` references. Empty leaves them unresolved.
    pub image_base_url: String,
    /// Base URL for `file-…` references. Empty leaves them unresolved.
    pub file_base_url: String,
    /// Image quality requested from the CDN (0-100).
    pub quality: u32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_base_url: String::new(),
            file_base_url: String::new(),
            quality: 85,
        }
    }
}

/// Settings for one listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    pub sort: SortOrder,
    pub require_media: bool,
    /// Show year sections (works: only when a filter is active).
    pub grouped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingsConfig {
    pub works: ListingConfig,
    pub exhibitions: ListingConfig,
    pub collections: ListingConfig,
    pub publications: ListingConfig,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            works: ListingConfig {
                sort: SortOrder::Year,
                require_media: true,
                grouped: true,
            },
            exhibitions: ListingConfig {
                sort: SortOrder::Year,
                require_media: false,
                grouped: true,
            },
            collections: ListingConfig {
                sort: SortOrder::Title,
                require_media: false,
                grouped: true,
            },
            publications: ListingConfig {
                sort: SortOrder::Source,
                require_media: false,
                grouped: false,
            },
        }
    }
}

impl ListingsConfig {
    pub fn get(&self, kind: ContentKind) -> &ListingConfig {
        match kind {
            ContentKind::Works => &self.works,
            ContentKind::Exhibitions => &self.exhibitions,
            ContentKind::Collections => &self.collections,
            ContentKind::Publications => &self.publications,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Filter controls, dates, captions.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in the header and page titles.
title = "Portfolio"
# Appended to detail page titles ("Work Title | Artist") when set.
artist = ""
# Contact links on the biography page. Empty hides the link.
contact_email = ""
instagram = ""

# ---------------------------------------------------------------------------
# Server
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1:3000"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Base URLs that asset references (image-<id>-<w>x<h>-<ext>, file-<id>-<ext>)
# resolve against. Media with a direct url don't need these.
image_base_url = ""
file_base_url = ""
# Image quality requested from the CDN (0 = worst, 100 = best).
quality = 85

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
# sort:          year (newest first) | title (A-Z) | source (store order)
# require_media: hide items that have no displayable image
# grouped:       show year sections
[listings.works]
sort = "year"
require_media = true
grouped = true

[listings.exhibitions]
sort = "year"
require_media = false
grouped = true

[listings.collections]
sort = "title"
require_media = false
grouped = true

[listings.publications]
sort = "source"
require_media = false
grouped = false

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Filter controls, dates, captions
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}
