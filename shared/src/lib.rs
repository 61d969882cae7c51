use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One expense record.
///
/// The field set matches the persisted JSON layout: a flat array of
/// `{id, amount, date, category, note}` objects stored under a single key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique within the collection; derived from the epoch-millisecond
    /// clock when the caller does not supply one.
    pub id: i64,
    /// Amount spent, in currency units. Validation admits only positive values.
    pub amount: f64,
    /// Calendar date as entered: `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    /// Category label. The store accepts any non-empty string; icon and
    /// color lookups fall back to a default for unrecognized labels.
    pub category: String,
    /// Optional free-text note.
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Parse the record's date for sorting and grouping purposes.
    ///
    /// Unparseable dates yield `None`; consumers rank those records last
    /// and leave them out of month groupings.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_expense_date(&self.date)
    }

    /// `(year, month)` grouping key, when the date parses.
    pub fn month_key(&self) -> Option<(i32, u32)> {
        self.parsed_date().map(|date| (date.year(), date.month()))
    }
}

/// Parse a stored date string: RFC 3339 first, then plain `YYYY-MM-DD`.
pub fn parse_expense_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A candidate expense as submitted by a form or an import.
///
/// All fields are optional at this stage; validation decides what is
/// acceptable. `id` is normally absent (the store assigns one), but
/// imports may supply it as a JSON number or a numeric string; both
/// deserialize to the numeric id the store compares against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default, deserialize_with = "deserialize_coercible_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
}

/// Accept an id as either a JSON number or a numeric string.
fn deserialize_coercible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Number(id)) => Ok(Some(id)),
        Some(IdRepr::Text(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("id is not numeric: {raw}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Summed spending for one category, as shown on the dashboard rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub icon: String,
    pub total: f64,
}

/// One pie-chart slice: a category's share of total spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub total: f64,
    /// Palette color assigned deterministically from the label.
    pub color: String,
}

/// Parallel label/value sequences for the monthly trend line chart,
/// ordered chronologically (oldest month first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_spending: f64,
    pub category_totals: Vec<CategoryTotal>,
    /// Most recently dated records, most recent first.
    pub recent_transactions: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingCharts {
    pub by_category: Vec<CategorySlice>,
    pub monthly_trend: MonthlySeries,
}

/// A category the expense form can offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success_message: String,
}
