//! The fixed category set plus deterministic icon and chart-color lookups.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A category the expense form offers.
pub struct CategoryDef {
    pub id: &'static str,
    pub label: &'static str,
}

/// Canonical categories. The store itself accepts any non-empty label;
/// this set is what pickers present.
pub const CATEGORIES: [CategoryDef; 4] = [
    CategoryDef {
        id: "food",
        label: "Food",
    },
    CategoryDef {
        id: "transport",
        label: "Transport",
    },
    CategoryDef {
        id: "entertainment",
        label: "Entertainment",
    },
    CategoryDef {
        id: "utilities",
        label: "Utilities",
    },
];

/// Chart palette. Assignment is by label hash, so no color table has to be
/// persisted anywhere.
const CATEGORY_PALETTE: [&str; 8] = [
    "#3B82F6", // blue
    "#10B981", // green
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // violet
    "#06B6D4", // cyan
    "#F43F5E", // pink
    "#6366F1", // indigo
];

static CATEGORY_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("food", "🍕"),
        ("transport", "🚗"),
        ("shopping", "🛍️"),
        ("health", "💊"),
        ("entertainment", "🎬"),
        ("utilities", "💡"),
        ("travel", "✈️"),
        ("other", "📦"),
    ])
});

const DEFAULT_ICON: &str = "📦";

/// Deterministic palette entry for a category label.
///
/// A 31x accumulator hash over the label's UTF-16 units picks the slot, so
/// the same label maps to the same color on every call and every run.
pub fn color_for_category(label: &str) -> &'static str {
    let mut hash: i32 = 0;
    for unit in label.encode_utf16() {
        hash = (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }
    CATEGORY_PALETTE[hash.unsigned_abs() as usize % CATEGORY_PALETTE.len()]
}

/// Icon for a category label; unrecognized labels get the default.
pub fn icon_for_category(label: &str) -> &'static str {
    CATEGORY_ICONS
        .get(label.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_ICON)
}
