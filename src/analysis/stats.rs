use crate::models::{CityAggregate, Listing, OverallSummary, PriceRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count and means over `listings`; all zeros for an empty input.
///
/// Price per area is averaged over listings with a positive area only.
pub fn overall_summary(listings: &[Listing]) -> OverallSummary {
    if listings.is_empty() {
        return OverallSummary::default();
    }

    let count = listings.len();
    let total_price: f64 = listings.iter().map(|l| l.price as f64).sum();
    let total_area: f64 = listings.iter().map(|l| l.area).sum();
    let per_area: Vec<f64> = listings.iter().filter_map(Listing::price_per_area).collect();

    OverallSummary {
        count,
        avg_price: total_price / count as f64,
        avg_price_per_area: mean(&per_area),
        avg_area: total_area / count as f64,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Most and least expensive city by average price per square meter
#[derive(Debug, Clone, PartialEq)]
pub enum CityExtremes {
    /// Nothing to compare
    NoData,
    Found {
        most_expensive: CityAggregate,
        most_affordable: CityAggregate,
    },
}

/// Pick the extreme cities; the first occurrence wins ties
pub fn city_extremes(aggregates: &[CityAggregate]) -> CityExtremes {
    let Some(first) = aggregates.first() else {
        return CityExtremes::NoData;
    };

    let (max, min) = aggregates
        .iter()
        .skip(1)
        .fold((first, first), |(max, min), city| {
            let max = if city.avg_price_per_m2 > max.avg_price_per_m2 {
                city
            } else {
                max
            };
            let min = if city.avg_price_per_m2 < min.avg_price_per_m2 {
                city
            } else {
                min
            };
            (max, min)
        });

    CityExtremes::Found {
        most_expensive: max.clone(),
        most_affordable: min.clone(),
    }
}

/// Group listings by exact city name, in order of first appearance
pub fn city_aggregates(listings: &[Listing]) -> Vec<CityAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Listing>> = HashMap::new();

    for listing in listings {
        let city = listing.city.as_str();
        groups
            .entry(city)
            .or_insert_with(|| {
                order.push(city);
                Vec::new()
            })
            .push(listing.clone());
    }

    order
        .into_iter()
        .map(|city| {
            let summary = overall_summary(&groups[city]);
            CityAggregate {
                city: city.to_string(),
                count: summary.count as u64,
                avg_price: summary.avg_price,
                avg_price_per_m2: summary.avg_price_per_area,
                avg_area: summary.avg_area,
            }
        })
        .collect()
}

/// Band a price falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    Below,
    Between,
    Above,
}

/// Thresholds splitting prices into three bands: `[0, lower)`,
/// `[lower, upper)` and `[upper, ..)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBands {
    pub lower: f64,
    pub upper: f64,
}

impl Default for PriceBands {
    fn default() -> Self {
        Self {
            lower: 50_000_000.0,
            upper: 100_000_000.0,
        }
    }
}

impl PriceBands {
    pub fn classify(&self, price: f64) -> PriceBucket {
        if price < self.lower {
            PriceBucket::Below
        } else if price < self.upper {
            PriceBucket::Between
        } else {
            PriceBucket::Above
        }
    }
}

/// Histogram of listings per price-per-area band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDistribution {
    pub below: usize,
    pub between: usize,
    pub above: usize,
}

impl PriceDistribution {
    pub fn total(&self) -> usize {
        self.below + self.between + self.above
    }

    pub fn get(&self, bucket: PriceBucket) -> usize {
        match bucket {
            PriceBucket::Below => self.below,
            PriceBucket::Between => self.between,
            PriceBucket::Above => self.above,
        }
    }
}

/// Bucket listings by price per area; listings without a usable area are skipped
pub fn price_distribution(listings: &[Listing], bands: &PriceBands) -> PriceDistribution {
    listings
        .iter()
        .filter_map(Listing::price_per_area)
        .fold(PriceDistribution::default(), |mut dist, ppa| {
            match bands.classify(ppa) {
                PriceBucket::Below => dist.below += 1,
                PriceBucket::Between => dist.between += 1,
                PriceBucket::Above => dist.above += 1,
            }
            dist
        })
}

/// Lowest and highest price per area, `None` when nothing has a usable area
pub fn price_per_area_range(listings: &[Listing]) -> Option<PriceRange> {
    listings
        .iter()
        .filter_map(Listing::price_per_area)
        .fold(None, |range: Option<PriceRange>, ppa| {
            Some(match range {
                None => PriceRange { min: ppa, max: ppa },
                Some(r) => PriceRange {
                    min: r.min.min(ppa),
                    max: r.max.max(ppa),
                },
            })
        })
}
