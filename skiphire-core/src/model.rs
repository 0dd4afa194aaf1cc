//! Domain data structures for skip catalog records.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifier for a skip option, unique within one catalog response.
pub struct SkipId(pub String);

impl fmt::Display for SkipId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for SkipId {
    fn from(raw: &str) -> Self {
        SkipId(raw.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Skip record as returned by the catalog endpoint.
pub struct RawSkip {
    /// Numeric identifier of the record.
    pub id: i64,
    /// Skip volume in cubic yards.
    pub size: u32,
    /// Number of days the skip stays on site.
    pub hire_period_days: u32,
    /// Transport surcharge, when the provider charges one.
    #[serde(default)]
    pub transport_cost: Option<i64>,
    /// Per-tonne surcharge, when the provider charges one.
    #[serde(default)]
    pub per_tonne_cost: Option<i64>,
    /// Price before VAT in whole pounds.
    pub price_before_vat: f64,
    /// VAT rate in percentage points.
    pub vat: f64,
    /// Postcode the price applies to.
    #[serde(default)]
    pub postcode: String,
    /// Area the price applies to.
    #[serde(default)]
    pub area: String,
    /// Provider flag marking the option as unavailable.
    #[serde(default)]
    pub forbidden: bool,
    /// Creation timestamp as sent by the provider.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp as sent by the provider.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Whether the skip may be placed on a public road.
    pub allowed_on_road: bool,
    /// Whether heavy waste such as soil or rubble is accepted.
    pub allows_heavy_waste: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display-ready skip option derived from a [`RawSkip`].
pub struct SkipOption {
    /// Stable identifier used for selection.
    pub id: SkipId,
    /// Title such as "6 Yard Skip".
    pub name: String,
    /// Size label such as "6 Yards".
    pub size: String,
    /// VAT-inclusive price in whole pounds.
    pub price: u32,
    /// Label such as "14 day hire period".
    pub hire_period: String,
    /// Placement and waste restrictions in one line.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Location a catalog is requested for.
pub struct CatalogQuery {
    /// Postcode district, e.g. "NR32".
    pub postcode: String,
    /// Area name, e.g. "Lowestoft".
    pub area: String,
}

impl CatalogQuery {
    /// Construct a new catalog query.
    #[must_use]
    pub fn new<P: Into<String>, A: Into<String>>(postcode: P, area: A) -> Self {
        Self {
            postcode: postcode.into(),
            area: area.into(),
        }
    }

    /// Check whether either part of the query is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postcode.trim().is_empty() || self.area.trim().is_empty()
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}", self.area, self.postcode)
    }
}
