//! CLI output formatting for the `check` command.
//!
//! # Information-First Display
//!
//! Output is **content-centric, not file-centric**. Each content type leads
//! with its label and what a visitor would see on its listing page; the
//! document it came from and the load details are indented context lines.
//!
//! # Output Format
//!
//! ```text
//! Content
//! 001 Works (5 listed)
//!     Source: works.json
//!     Loaded: 8, skipped: 0
//!     Years: 2023, 2021, 2020
//!     Classifications: Drawings, Object Images, Paintings
//! 002 Exhibitions (2 listed)
//!     Source: exhibitions.json
//!     Loaded: 2, skipped: 1
//! 003 Collections (1 listed, 1 private)
//!     Source: collections.json
//!     Loaded: 2, skipped: 0
//! 004 Publications (missing)
//!     Source: publications.json
//!
//! Home
//!     home.json
//!
//! Checked 4 content types, 1 missing, 1 item skipped
//! ```
//!
//! # Architecture
//!
//! [`format_check_output`] returns `Vec<String>` for testability and
//! [`print_check_output`] writes it to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::labels::tag_label;
use crate::site::{Inventory, InventoryEntry};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for a content type.
///
/// ```text
/// 001 Works (5 listed)
/// 003 Collections (1 listed, 1 private)
/// 004 Publications (missing)
/// ```
fn entry_header(index: usize, entry: &InventoryEntry) -> String {
    let detail = match (&entry.report, entry.hidden) {
        (None, _) => "missing".to_string(),
        (Some(_), 0) => format!("{} listed", entry.listed),
        (Some(_), hidden) => format!("{} listed, {} private", entry.listed, hidden),
    };
    format!("{} {} ({})", format_index(index), entry.kind.label(), detail)
}

/// Join facet values, truncated to `max` entries.
fn facet_line(values: &[String], max: usize) -> String {
    let shown: Vec<&str> = values.iter().take(max).map(String::as_str).collect();
    let mut line = shown.join(", ");
    if values.len() > max {
        line.push_str(&format!(", ... ({} more)", values.len() - max));
    }
    line
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Check output
// ============================================================================

const MAX_FACETS: usize = 12;

/// Format the content inventory.
pub fn format_check_output(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Content".to_string());

    for (i, entry) in inventory.entries.iter().enumerate() {
        lines.push(entry_header(i + 1, entry));
        lines.push(format!("{}Source: {}.json", indent(1), entry.kind.slug()));
        let Some(report) = &entry.report else {
            continue;
        };
        lines.push(format!(
            "{}Loaded: {}, skipped: {}",
            indent(1),
            report.loaded,
            report.skipped
        ));
        if !entry.years.is_empty() {
            lines.push(format!(
                "{}Years: {}",
                indent(1),
                facet_line(&entry.years, MAX_FACETS)
            ));
        }
        if !entry.tags.is_empty() {
            let labels: Vec<String> = entry.tags.iter().map(|t| tag_label(t)).collect();
            lines.push(format!(
                "{}Classifications: {}",
                indent(1),
                facet_line(&labels, MAX_FACETS)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Home".to_string());
    if inventory.home {
        lines.push(format!("{}home.json", indent(1)));
    } else {
        lines.push(format!("{}home.json (missing)", indent(1)));
    }

    let missing = inventory
        .entries
        .iter()
        .filter(|e| e.report.is_none())
        .count();
    let skipped: usize = inventory
        .entries
        .iter()
        .filter_map(|e| e.report.as_ref())
        .map(|r| r.skipped)
        .sum();
    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {} missing, {} skipped",
        plural(inventory.entries.len(), "content type"),
        missing,
        plural(skipped, "item")
    ));

    lines
}

/// Print the content inventory to stdout.
pub fn print_check_output(inventory: &Inventory) {
    for line in format_check_output(inventory) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
