//! Catalog filter criteria, query composition, and shareable URL state.
//!
//! The catalog page is driven entirely by its query string. [`parse_criteria`]
//! reads the filter keys into a [`FilterCriteria`], [`build_query`] turns that
//! into a storage-agnostic [`QuerySpec`], and [`UrlState`] applies the filter
//! controls' mutations back onto the query string so links stay shareable.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::types::Price;

// ---------------------------------------------------------------------------
// URL keys
// ---------------------------------------------------------------------------

pub const KEY_CATEGORY: &str = "category";
/// Repeatable.
pub const KEY_TYPE: &str = "type";
/// Repeatable.
pub const KEY_CONDITION: &str = "condition";
pub const KEY_MIN_PRICE: &str = "minPrice";
pub const KEY_MAX_PRICE: &str = "maxPrice";
/// Page size of the listing endpoint. Not a filter key.
pub const KEY_LIMIT: &str = "limit";

/// Every key owned by the catalog filters. Other query keys are left alone.
pub const FILTER_KEYS: &[&str] = &[
    KEY_CATEGORY,
    KEY_TYPE,
    KEY_CONDITION,
    KEY_MIN_PRICE,
    KEY_MAX_PRICE,
];

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Top-level catalog section a piano is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    New,
    Used,
    Digital,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::New, Category::Used, Category::Digital];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::New => "new",
            Category::Used => "used",
            Category::Digital => "digital",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The catalog filters currently in effect, reconstructed from the URL.
///
/// Sets are ordered so two criteria compare equal regardless of the order
/// their values appeared in the query string. The catalog view keys its
/// re-fetches on this equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub types: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
    pub price_min: Option<Price>,
    pub price_max: Option<Price>,
}

impl FilterCriteria {
    /// `true` when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.types.is_empty()
            && self.conditions.is_empty()
            && self.price_min.is_none()
            && self.price_max.is_none()
    }
}

/// Parse catalog filters from a raw query string (with or without a leading `?`).
///
/// Never fails. Unknown categories and malformed or negative prices are
/// treated as absent. `minPrice > maxPrice` is passed through untouched.
pub fn parse_criteria(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    criteria_from_pairs(form_urlencoded::parse(query.as_bytes()))
}

/// Build [`FilterCriteria`] from already-decoded key/value pairs.
///
/// For the single-valued keys (`category`, `minPrice`, `maxPrice`) the first
/// occurrence decides.
pub fn criteria_from_pairs<I, K, V>(pairs: I) -> FilterCriteria
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = FilterCriteria::default();
    let mut seen_category = false;
    let mut seen_min = false;
    let mut seen_max = false;

    for (key, value) in pairs {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            KEY_CATEGORY if !seen_category => {
                seen_category = true;
                criteria.category = value.parse().ok();
            }
            KEY_TYPE => {
                criteria.types.insert(value.to_string());
            }
            KEY_CONDITION => {
                criteria.conditions.insert(value.to_string());
            }
            KEY_MIN_PRICE if !seen_min => {
                seen_min = true;
                criteria.price_min = parse_price(value);
            }
            KEY_MAX_PRICE if !seen_max => {
                seen_max = true;
                criteria.price_max = parse_price(value);
            }
            _ => {}
        }
    }

    criteria
}

/// Parse a non-negative decimal price, failing open to `None`.
pub fn parse_price(raw: &str) -> Option<Price> {
    raw.trim()
        .parse::<Price>()
        .ok()
        .filter(|price| !price.is_sign_negative())
}

/// Read the requested page size from a raw query string.
///
/// The first `limit` decides; a non-numeric value is treated as absent.
pub fn parse_limit(query: &str) -> Option<i64> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == KEY_LIMIT)
        .and_then(|(_, value)| value.trim().parse().ok())
}

// ---------------------------------------------------------------------------
// Query specification
// ---------------------------------------------------------------------------

/// Catalog columns a query may filter or order on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Category,
    Type,
    Condition,
    Price,
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `field = value`
    Eq { field: Field, value: String },
    /// `field IN values`
    In {
        field: Field,
        values: BTreeSet<String>,
    },
    /// Inclusive range; a missing bound is unbounded on that side.
    Range {
        field: Field,
        min: Option<Price>,
        max: Option<Price>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: Field,
    pub direction: Direction,
}

impl Default for OrderBy {
    /// Newest listings first.
    fn default() -> Self {
        Self {
            field: Field::CreatedAt,
            direction: Direction::Desc,
        }
    }
}

/// A storage-agnostic list request against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub predicates: Vec<Predicate>,
    pub order: OrderBy,
    pub limit: Option<i64>,
}

impl QuerySpec {
    /// The full catalog in default order.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Translate filter criteria into a single catalog request.
///
/// Each present criterion contributes exactly one predicate; an empty
/// criteria set yields the unfiltered catalog ordered newest first.
pub fn build_query(criteria: &FilterCriteria) -> QuerySpec {
    let mut predicates = Vec::new();

    if let Some(category) = criteria.category {
        predicates.push(Predicate::Eq {
            field: Field::Category,
            value: category.as_str().to_string(),
        });
    }
    if !criteria.types.is_empty() {
        predicates.push(Predicate::In {
            field: Field::Type,
            values: criteria.types.clone(),
        });
    }
    if !criteria.conditions.is_empty() {
        predicates.push(Predicate::In {
            field: Field::Condition,
            values: criteria.conditions.clone(),
        });
    }
    if criteria.price_min.is_some() || criteria.price_max.is_some() {
        predicates.push(Predicate::Range {
            field: Field::Price,
            min: criteria.price_min,
            max: criteria.price_max,
        });
    }

    QuerySpec {
        predicates,
        order: OrderBy::default(),
        limit: None,
    }
}

// ---------------------------------------------------------------------------
// Filter controls
// ---------------------------------------------------------------------------

/// Add `value` when `checked`, remove it otherwise. Applying the same toggle
/// twice is a no-op the second time.
pub fn toggle_value(current: &BTreeSet<String>, value: &str, checked: bool) -> BTreeSet<String> {
    let mut next = current.clone();
    if checked {
        next.insert(value.to_string());
    } else {
        next.remove(value);
    }
    next
}

/// The repeatable (checkbox) filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Type,
    Condition,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Type => KEY_TYPE,
            FilterKey::Condition => KEY_CONDITION,
        }
    }
}

/// The shareable query-string state of the catalog page.
///
/// Keeps pairs in order, including keys that do not belong to the filters.
/// Every mutation leaves the state complete; there is no intermediate state
/// where only one price bound has been written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pairs: Vec<(String, String)>,
}

impl UrlState {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn criteria(&self) -> FilterCriteria {
        criteria_from_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.remove_key(KEY_CATEGORY);
        if let Some(category) = category {
            self.push(KEY_CATEGORY, category.as_str());
        }
    }

    /// Check or uncheck one value of a repeatable filter.
    pub fn toggle(&mut self, key: FilterKey, value: &str, checked: bool) {
        let current: BTreeSet<String> = self
            .pairs
            .iter()
            .filter(|(k, _)| k == key.as_str())
            .map(|(_, v)| v.clone())
            .collect();
        let next = toggle_value(&current, value, checked);

        self.remove_key(key.as_str());
        for value in next {
            self.push(key.as_str(), &value);
        }
    }

    /// Commit a price range. Both bounds are replaced together.
    pub fn apply_price_range(&mut self, min: Price, max: Price) {
        self.pairs
            .retain(|(k, _)| k != KEY_MIN_PRICE && k != KEY_MAX_PRICE);
        self.push(KEY_MIN_PRICE, &min.to_string());
        self.push(KEY_MAX_PRICE, &max.to_string());
    }

    /// Remove every filter key. Unrelated keys survive.
    pub fn clear(&mut self) {
        self.pairs
            .retain(|(k, _)| !FILTER_KEYS.contains(&k.as_str()));
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    fn remove_key(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
