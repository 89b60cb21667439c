//! Pure, stateless transformations over listing collections.
//!
//! Nothing in here performs I/O or keeps state between calls.

pub mod filter;
pub mod stats;

pub use filter::{filter_listings, similar_listings};
pub use stats::{
    city_aggregates, city_extremes, overall_summary, price_distribution, price_per_area_range,
    CityExtremes, PriceBands, PriceBucket, PriceDistribution,
};
