pub mod prediction;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use prediction::{ModelInfo, PredictionRequest, PredictionResponse};

/// Kind of property a listing describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    Villa,
    Office,
    Store,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Office,
        PropertyType::Store,
        PropertyType::Land,
    ];

    /// Wire name, as the listings API spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Office => "office",
            PropertyType::Store => "store",
            PropertyType::Land => "land",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical condition of the property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Renovated,
    Normal,
    Old,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Renovated => "renovated",
            Condition::Normal => "normal",
            Condition::Old => "old",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core listing data model
///
/// `price` is in the smallest currency unit, `area` in square meters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub price: u64,
    pub area: f64,
    pub rooms: u32,
    /// Construction year (Solar Hijri); the API leaves it null when unknown
    #[serde(default)]
    pub year_built: Option<i32>,
    pub property_type: PropertyType,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Price divided by area, or `None` when the area is not positive
    pub fn price_per_area(&self) -> Option<f64> {
        if self.area > 0.0 {
            Some(self.price as f64 / self.area)
        } else {
            None
        }
    }
}

/// User-selected constraints for narrowing a listing collection
///
/// Every field is optional; `None` (or an empty string) means no
/// constraint on that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-sensitive substring of the listing's city
    pub city: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<u64>,
    /// Inclusive upper price bound
    ///
    /// `Some(0)` is a real bound and keeps only free listings; leave the
    /// field `None` for no upper limit.
    pub max_price: Option<u64>,
    pub property_type: Option<PropertyType>,
    /// Compared as text against the listing's room count.
    ///
    /// The "5+" option is matched literally, so it never equals a numeric
    /// room count. Whether it should mean "five or more" is still an open
    /// product question.
    pub rooms: Option<String>,
}

impl FilterCriteria {
    /// Sentinel offered by the rooms selector for "five or more"
    pub const FIVE_OR_MORE_ROOMS: &'static str = "5+";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_min_price(mut self, price: u64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn with_max_price(mut self, price: u64) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn with_rooms(mut self, rooms: impl Into<String>) -> Self {
        self.rooms = Some(rooms.into());
        self
    }

    /// True when no field constrains anything
    pub fn is_empty(&self) -> bool {
        non_empty(&self.city).is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.property_type.is_none()
            && non_empty(&self.rooms).is_none()
    }
}

/// Treat `Some("")` the same as `None`
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Per-city summary, as served by the statistics and analysis endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityAggregate {
    pub city: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub avg_price_per_m2: f64,
    #[serde(default)]
    pub avg_area: f64,
}

/// Count and arithmetic means over a listing collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallSummary {
    pub count: usize,
    pub avg_price: f64,
    pub avg_price_per_area: f64,
    pub avg_area: f64,
}

/// Listings response: either a bare array or a paginated envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingsPayload {
    Bare(Vec<Listing>),
    Page {
        #[serde(default)]
        next: Option<String>,
        results: Vec<Listing>,
    },
}

impl ListingsPayload {
    /// Collapse either shape into the canonical ordered listing sequence
    pub fn into_listings(self) -> Vec<Listing> {
        match self {
            ListingsPayload::Page { results, .. } => results,
            ListingsPayload::Bare(listings) => listings,
        }
    }

    /// URL of the next page, when the server paginates
    pub fn next_page(&self) -> Option<&str> {
        match self {
            ListingsPayload::Page { next, .. } => next.as_deref(),
            ListingsPayload::Bare(_) => None,
        }
    }
}

/// Overall block of the statistics endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallStats {
    #[serde(default)]
    pub total_listings: u64,
    #[serde(default)]
    pub avg_price: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub avg_area: Option<f64>,
    #[serde(default)]
    pub avg_price_per_m2: Option<f64>,
}

/// Response of `GET /api/listings/stats/`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketStats {
    #[serde(default)]
    pub overall: Option<OverallStats>,
    #[serde(default)]
    pub by_city: Vec<CityAggregate>,
}

/// Per property type summary from the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyTypeAggregate {
    pub property_type: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub avg_price_per_m2: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceTrends {
    #[serde(default)]
    pub avg_price_per_m2: f64,
    #[serde(default)]
    pub price_range_per_m2: Option<PriceRange>,
}

/// Response of the AI service's `GET /analyze/`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketAnalysis {
    #[serde(default)]
    pub overall_stats: Option<OverallStats>,
    #[serde(default)]
    pub city_analysis: Vec<CityAggregate>,
    #[serde(default)]
    pub property_type_analysis: Vec<PropertyTypeAggregate>,
    #[serde(default)]
    pub price_trends: Option<PriceTrends>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
