//! Content model shared by the store, the listing pipeline, and the renderer.
//!
//! These types mirror the JSON documents exported by the content store. The
//! store is lenient by nature: any field may be missing or `null`, media fields
//! arrive either as a single object or as an array, years are sometimes
//! numbers and sometimes strings, and rich text may be a plain string or a
//! list of portable-text blocks. Deserialization absorbs all of that so the
//! rest of the crate works with one shape.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;

// ============================================================================
// Media
// ============================================================================

/// An image or file reference as stored in the content store.
///
/// Either `url` is set directly, or `asset._ref` holds a store asset id that
/// [`crate::assets::AssetResolver`] turns into a URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image_data: Option<ImageData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Media {
    /// Whether this reference points at anything at all.
    pub fn has_source(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
            || self
                .asset
                .as_ref()
                .is_some_and(|a| !a.reference.trim().is_empty())
    }

    /// Pixel dimensions, when the store exported image metadata.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.image_data.as_ref().and_then(|d| d.dimensions)
    }

    /// Landscape when wider than tall. Unknown dimensions count as 800×600.
    pub fn is_landscape(&self) -> bool {
        let d = self.dimensions().unwrap_or(Dimensions {
            width: 800.0,
            height: 600.0,
        });
        d.width > d.height
    }
}

// ============================================================================
// Lenient field decoders
// ============================================================================

/// Decode a field that may be a single value, an array, `null`, or absent.
///
/// A single value becomes a one-element list, `null` and absence become an
/// empty list. Array elements that don't decode as `T` are dropped rather
/// than failing the whole item.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        Some(single) => serde_json::from_value(single).ok().into_iter().collect(),
    })
}

/// Decode a short text field that may be exported as a string or a number.
///
/// Anything else (objects, arrays, booleans) is treated as missing.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a slug that may be exported flat (`"slug": "x"`) or as the store's
/// raw slug object (`"slug": {"current": "x"}`).
pub fn lenient_slug<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let slug = match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Object(map)) => map
            .get("current")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };
    Ok(slug.filter(|s| !s.trim().is_empty()))
}

/// Decode rich text: a markdown string, or portable-text blocks whose span
/// texts are joined into paragraphs.
pub fn rich_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Array(blocks)) => {
            let paragraphs: Vec<String> = blocks.iter().filter_map(block_text).collect();
            Some(paragraphs.join("\n\n"))
        }
        _ => None,
    };
    Ok(text.filter(|t| !t.trim().is_empty()))
}

fn block_text(block: &Value) -> Option<String> {
    let children = block.get("children")?.as_array()?;
    let text: String = children
        .iter()
        .filter_map(|span| span.get("text").and_then(Value::as_str))
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

// ============================================================================
// Year keys
// ============================================================================

/// Grouping and sorting key derived from a date or a year field.
///
/// The derived `Ord` is *display* order: numeric years newest first, then
/// free-text years alphabetically, then `Unknown` last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YearKey {
    Year(i32),
    Other(String),
    Unknown,
}

impl YearKey {
    /// Key from a free-text year field (`"2023"`, `"ca. 1990"`, missing).
    pub fn from_year(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") => YearKey::Unknown,
            Some(t) => match t.parse::<i32>() {
                Ok(year) => YearKey::Year(year),
                Err(_) => YearKey::Other(t.to_string()),
            },
        }
    }

    /// Key from an ISO date or datetime, taking its calendar year.
    /// Partial dates (`"2023"`, `"2023-05"`) use their leading year.
    /// Unparseable or missing dates are `Unknown`.
    pub fn from_date(date: Option<&str>) -> Self {
        date.and_then(|text| parse_date(text).map(|d| d.year()).or_else(|| leading_year(text)))
            .map(YearKey::Year)
            .unwrap_or(YearKey::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, YearKey::Year(_))
    }

    /// Text used both as a section heading and as the `year` filter value.
    pub fn label(&self) -> String {
        match self {
            YearKey::Year(y) => y.to_string(),
            YearKey::Other(text) => text.clone(),
            YearKey::Unknown => "Unknown".to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            YearKey::Year(_) => 0,
            YearKey::Other(_) => 1,
            YearKey::Unknown => 2,
        }
    }
}

impl Ord for YearKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (YearKey::Year(a), YearKey::Year(b)) => b.cmp(a),
            (YearKey::Other(a), YearKey::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for YearKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Four-digit year at the start of `text`, not followed by another digit.
fn leading_year(text: &str) -> Option<i32> {
    let text = text.trim();
    let digits = text.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match text[4..].chars().next() {
        Some(c) if c.is_ascii_digit() => None,
        _ => digits.parse().ok(),
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 datetime into a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|d| d.date_naive()))
}

// ============================================================================
// Documents
// ============================================================================

/// A work as listed on `/works` and shown on `/works/{slug}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_slug")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub images: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub classification: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description_medium: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub publications: Vec<WorkPublication>,
}

/// A publication mention attached to a single work.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkPublication {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub file: Option<Media>,
}

/// The short form of a work referenced from an exhibition or collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_slug")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub images: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub classification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_slug")]
    pub slug: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default)]
    pub is_solo: Option<bool>,
    #[serde(default, deserialize_with = "rich_text")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub photo_credits: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub assigned_works: Vec<WorkSummary>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub exhibition_photos: Vec<Media>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_slug")]
    pub slug: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default, deserialize_with = "rich_text")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub assigned_works: Vec<WorkSummary>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub collection_photos: Vec<Media>,
}

impl Collection {
    /// Private collections are reachable by slug but never listed.
    pub fn is_private(&self) -> bool {
        self.is_private == Some(true)
    }
}

/// A publication entry on `/publications`.
///
/// Publications are often embedded array members with only a `_key`, so the
/// id is resolved after decoding by [`Publication::assign_id`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub publication_types: Vec<String>,
    #[serde(rename = "image", default, deserialize_with = "one_or_many")]
    pub images: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "rich_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<Media>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Publication {
    /// Fill an empty id from `_key`, then from the position in the source list.
    pub fn assign_id(&mut self, index: usize) {
        if self.id.trim().is_empty() {
            self.id = match &self.key {
                Some(key) if !key.trim().is_empty() => key.clone(),
                _ => format!("publication-{index}"),
            };
        }
    }
}

/// The singleton home document: site title, marquee, gallery, biography.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Home {
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub marquee_text: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub image_gallery: Vec<Media>,
    #[serde(deserialize_with = "one_or_many")]
    pub bio_modules: Vec<BioModule>,
    #[serde(deserialize_with = "rich_text")]
    pub publication_text: Option<String>,
}

/// One text + image block of the biography page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BioModule {
    pub layout: Option<String>,
    #[serde(deserialize_with = "rich_text")]
    pub text: Option<String>,
    #[serde(rename = "image", deserialize_with = "one_or_many")]
    pub images: Vec<Media>,
    pub image_caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_image_object_normalizes_to_one_element() {
        let work: Work = serde_json::from_value(json!({
            "_id": "w1",
            "images": {"url": "https://example.com/a.jpg"}
        }))
        .unwrap();
        assert_eq!(work.images.len(), 1);
        assert_eq!(work.images[0].url.as_deref(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn missing_and_null_images_normalize_to_empty() {
        let missing: Work = serde_json::from_value(json!({"_id": "w1"})).unwrap();
        let null: Work = serde_json::from_value(json!({"_id": "w2", "images": null})).unwrap();
        assert!(missing.images.is_empty());
        assert!(null.images.is_empty());
    }

    #[test]
    fn malformed_array_elements_are_dropped() {
        let work: Work = serde_json::from_value(json!({
            "_id": "w1",
            "images": [{"url": "a.jpg"}, "not-an-image", 42]
        }))
        .unwrap();
        assert_eq!(work.images.len(), 1);
    }

    #[test]
    fn numeric_year_becomes_text() {
        let work: Work = serde_json::from_value(json!({"_id": "w1", "year": 2021})).unwrap();
        assert_eq!(work.year.as_deref(), Some("2021"));
    }

    #[test]
    fn slug_object_is_flattened() {
        let work: Work =
            serde_json::from_value(json!({"_id": "w1", "slug": {"current": "red-room"}})).unwrap();
        assert_eq!(work.slug.as_deref(), Some("red-room"));
    }

    #[test]
    fn blank_slug_is_none() {
        let work: Work = serde_json::from_value(json!({"_id": "w1", "slug": "  "})).unwrap();
        assert_eq!(work.slug, None);
    }

    #[test]
    fn portable_text_blocks_join_into_paragraphs() {
        let ex: Exhibition = serde_json::from_value(json!({
            "_id": "e1",
            "description": [
                {"_type": "block", "children": [{"text": "First "}, {"text": "line."}]},
                {"_type": "block", "children": [{"text": "Second."}]}
            ]
        }))
        .unwrap();
        assert_eq!(ex.description.as_deref(), Some("First line.\n\nSecond."));
    }

    #[test]
    fn media_without_source_is_not_displayable() {
        let empty = Media::default();
        assert!(!empty.has_source());
        let with_ref: Media =
            serde_json::from_value(json!({"asset": {"_ref": "image-abc-10x20-jpg"}})).unwrap();
        assert!(with_ref.has_source());
    }

    #[test]
    fn orientation_defaults_to_landscape() {
        assert!(Media::default().is_landscape());
        let portrait: Media = serde_json::from_value(json!({
            "imageData": {"dimensions": {"width": 600, "height": 900}}
        }))
        .unwrap();
        assert!(!portrait.is_landscape());
    }

    #[test]
    fn year_key_from_year_text() {
        assert_eq!(YearKey::from_year(Some("2023")), YearKey::Year(2023));
        assert_eq!(YearKey::from_year(Some(" ")), YearKey::Unknown);
        assert_eq!(YearKey::from_year(None), YearKey::Unknown);
        assert_eq!(
            YearKey::from_year(Some("ca. 1990")),
            YearKey::Other("ca. 1990".to_string())
        );
    }

    #[test]
    fn year_key_from_date_and_datetime() {
        assert_eq!(YearKey::from_date(Some("2022-05-01")), YearKey::Year(2022));
        assert_eq!(
            YearKey::from_date(Some("2019-12-31T20:00:00Z")),
            YearKey::Year(2019)
        );
        assert_eq!(YearKey::from_date(Some("soon")), YearKey::Unknown);
        assert_eq!(YearKey::from_date(None), YearKey::Unknown);
    }

    #[test]
    fn year_key_from_partial_dates() {
        assert_eq!(YearKey::from_date(Some("2023")), YearKey::Year(2023));
        assert_eq!(YearKey::from_date(Some("2023-05")), YearKey::Year(2023));
        assert_eq!(YearKey::from_date(Some(" 2021-07 ")), YearKey::Year(2021));
        assert_eq!(YearKey::from_date(Some("20231")), YearKey::Unknown);
        assert_eq!(YearKey::from_date(Some("23-05")), YearKey::Unknown);
    }

    #[test]
    fn year_key_display_order() {
        let mut keys = vec![
            YearKey::Unknown,
            YearKey::Year(2021),
            YearKey::Other("undated".to_string()),
            YearKey::Year(2023),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                YearKey::Year(2023),
                YearKey::Year(2021),
                YearKey::Other("undated".to_string()),
                YearKey::Unknown,
            ]
        );
    }

    #[test]
    fn publication_id_falls_back_to_key_then_index() {
        let mut with_key: Publication =
            serde_json::from_value(json!({"_key": "k1", "title": "Zine"})).unwrap();
        with_key.assign_id(0);
        assert_eq!(with_key.id, "k1");

        let mut bare: Publication = serde_json::from_value(json!({"title": "Zine"})).unwrap();
        bare.assign_id(3);
        assert_eq!(bare.id, "publication-3");

        let mut with_id: Publication =
            serde_json::from_value(json!({"_id": "p9", "_key": "k"})).unwrap();
        with_id.assign_id(1);
        assert_eq!(with_id.id, "p9");
    }

    #[test]
    fn home_tolerates_missing_everything() {
        let home: Home = serde_json::from_value(json!({})).unwrap();
        assert_eq!(home, Home::default());
    }
}
