//! Category lookup for the Trending Now feed.
//!
//! The feed is filtered server-side by a numeric category id passed in the
//! page URL. This module maps those ids to the display names the feed uses,
//! so the output envelope can carry a human-readable `category_name` next to
//! the raw id.
//!
//! The table is fixed: id 12 does not exist upstream, and unknown ids resolve
//! to `"Unknown"` instead of failing the run.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Category id → display name, as used by the Trending Now page.
static CATEGORY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("0", "All categories"),
        ("1", "Autos and Vehicles"),
        ("2", "Beauty and Fashion"),
        ("3", "Business and Finance"),
        ("4", "Entertainment"),
        ("5", "Food and Drink"),
        ("6", "Games"),
        ("7", "Health"),
        ("8", "Hobbies and Leisure"),
        ("9", "Jobs and Education"),
        ("10", "Law and Government"),
        ("11", "Other"),
        ("13", "Pets and Animals"),
        ("14", "Politics"),
        ("15", "Science"),
        ("16", "Shopping"),
        ("17", "Sports"),
        ("18", "Technology"),
        ("19", "Travel and Transportation"),
        ("20", "Climate"),
    ])
});

/// Resolve a category id to its display name.
///
/// Unrecognized ids (including the upstream gap at 12) resolve to
/// `"Unknown"`; a bad id must not fail the run.
pub fn category_name(id: &str) -> &'static str {
    CATEGORY_NAMES.get(id).copied().unwrap_or("Unknown")
}
