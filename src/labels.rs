//! Display labels for content fields.
//!
//! Every page degrades the same way when a field is missing: titles fall back
//! to "Untitled", dates and years to an em-dash, and classification tags are
//! turned into human labels in one place.
//!
//! ## Tags
//!
//! Classification tags come from the content store as slugs, and the same tag
//! can show up spelled differently depending on where it came from
//! (`object-images` on a work, `objectimages` as a bucket name). Tags are
//! compared with [`same_tag`], which ignores case, dashes, and spaces.
//! - `paintings` → "Paintings"
//! - `object-images` → "Object Images"
//! - `objectimages` → "Object Images"

use crate::types::parse_date;

/// Shown for a missing title.
pub const UNTITLED: &str = "Untitled";

/// Shown for a missing date, year, or other short field.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Title to display, with the "Untitled" fallback for missing or blank titles.
pub fn display_title(title: Option<&str>) -> &str {
    match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => UNTITLED,
    }
}

/// Short field to display, with the em-dash fallback.
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Tag known to be stored without its separator.
const JOINED_TAGS: &[(&str, &str)] = &[("objectimages", "Object Images")];

/// Human label for a classification or publication-type tag.
pub fn tag_label(tag: &str) -> String {
    let folded = fold_tag(tag);
    if let Some((_, label)) = JOINED_TAGS.iter().find(|(t, _)| *t == folded) {
        return label.to_string();
    }
    tag.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two tags name the same classification.
pub fn same_tag(a: &str, b: &str) -> bool {
    fold_tag(a) == fold_tag(b)
}

fn fold_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Long US-style date (`May 1, 2023`). Unparseable dates are shown as-is,
/// missing ones as the placeholder.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        None => PLACEHOLDER.to_string(),
        Some(text) if text.trim().is_empty() => PLACEHOLDER.to_string(),
        Some(text) => match parse_date(text) {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => text.to_string(),
        },
    }
}

/// Date range for exhibitions: `May 1, 2023 – June 3, 2023`, or the start alone.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    match end.filter(|e| !e.trim().is_empty()) {
        Some(end) => format!("{} \u{2013} {}", format_date(start), format_date(Some(end))),
        None => format_date(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_is_untitled() {
        assert_eq!(display_title(None), "Untitled");
        assert_eq!(display_title(Some("  ")), "Untitled");
        assert_eq!(display_title(Some("Night Swim")), "Night Swim");
    }

    #[test]
    fn missing_short_field_is_em_dash() {
        assert_eq!(or_placeholder(None), "\u{2014}");
        assert_eq!(or_placeholder(Some("Paris")), "Paris");
    }

    #[test]
    fn single_word_tag_is_capitalized() {
        assert_eq!(tag_label("paintings"), "Paintings");
    }

    #[test]
    fn dashed_tag_becomes_words() {
        assert_eq!(tag_label("object-images"), "Object Images");
    }

    #[test]
    fn joined_tag_has_known_label() {
        assert_eq!(tag_label("objectimages"), "Object Images");
    }

    #[test]
    fn tags_compare_loosely() {
        assert!(same_tag("object-images", "objectimages"));
        assert!(same_tag("Paintings", "paintings"));
        assert!(!same_tag("paintings", "drawings"));
    }

    #[test]
    fn date_is_long_form() {
        assert_eq!(format_date(Some("2023-05-01")), "May 1, 2023");
        assert_eq!(format_date(Some("2021-11-20T18:00:00Z")), "November 20, 2021");
    }

    #[test]
    fn unparseable_date_is_kept() {
        assert_eq!(format_date(Some("Spring 2020")), "Spring 2020");
        assert_eq!(format_date(None), "\u{2014}");
    }

    #[test]
    fn date_range_with_and_without_end() {
        assert_eq!(
            format_date_range(Some("2023-05-01"), Some("2023-06-03")),
            "May 1, 2023 \u{2013} June 3, 2023"
        );
        assert_eq!(format_date_range(Some("2023-05-01"), None), "May 1, 2023");
    }
}
