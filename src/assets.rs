//! Asset reference → URL resolution.
//!
//! The content store exports media either with a direct `url` or with an
//! asset reference in the store's id format:
//!
//! ```text
//! image-<id>-<width>x<height>-<ext>   → <image_base>/<id>-<width>x<height>.<ext>
//! file-<id>-<ext>                     → <file_base>/<id>.<ext>
//! ```
//!
//! Image URLs get the CDN's transform parameters appended (`auto=format`,
//! `fit=max`, the configured quality, and an optional width).

use crate::config::AssetsConfig;
use crate::types::Media;

#[derive(Debug, Clone)]
pub struct AssetResolver {
    image_base: String,
    file_base: String,
    quality: u32,
}

impl AssetResolver {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            image_base: config.image_base_url.trim_end_matches('/').to_string(),
            file_base: config.file_base_url.trim_end_matches('/').to_string(),
            quality: config.quality,
        }
    }

    /// URL for an image, optionally resized to `width` pixels.
    pub fn image_url(&self, media: &Media, width: Option<u32>) -> Option<String> {
        if let Some(url) = media.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Some(url.to_string());
        }
        let reference = &media.asset.as_ref()?.reference;
        let file = image_file_name(reference)?;
        if self.image_base.is_empty() {
            return None;
        }
        let mut url = format!(
            "{}/{}?auto=format&fit=max&q={}",
            self.image_base, file, self.quality
        );
        if let Some(w) = width {
            url.push_str(&format!("&w={w}"));
        }
        Some(url)
    }

    /// URL for a downloadable file (publication PDFs).
    pub fn file_url(&self, media: &Media) -> Option<String> {
        if let Some(url) = media.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Some(url.to_string());
        }
        let file = file_name(&media.asset.as_ref()?.reference)?;
        if self.file_base.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.file_base, file))
    }
}

/// `image-abc-100x200-jpg` → `abc-100x200.jpg`
fn image_file_name(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix("image-")?;
    let (stem, ext) = rest.rsplit_once('-')?;
    let (_, dims) = stem.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    if w.parse::<u32>().is_err() || h.parse::<u32>().is_err() || ext.is_empty() {
        return None;
    }
    Some(format!("{stem}.{ext}"))
}

/// `file-abc-pdf` → `abc.pdf`
fn file_name(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix("file-")?;
    let (id, ext) = rest.rsplit_once('-')?;
    if id.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!("{id}.{ext}"))
}
