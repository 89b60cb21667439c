//! Text rendering for the terminal front-end.

use crate::analysis::{CityExtremes, PriceBands, PriceBucket, PriceDistribution};
use crate::models::{
    CityAggregate, Listing, OverallStats, OverallSummary, PredictionResponse, PriceRange,
    PriceTrends, PropertyTypeAggregate,
};

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

/// "8.5 billion", "95 million", or the plain amount below a million
pub fn format_price(price: f64) -> String {
    if price >= BILLION {
        format!("{:.1} billion", price / BILLION)
    } else if price >= MILLION {
        format!("{:.0} million", price / MILLION)
    } else {
        format!("{:.0}", price)
    }
}

/// Qualitative label for a prediction confidence in `[0, 1]`
pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "high"
    } else if confidence >= 0.6 {
        "good"
    } else {
        "fair"
    }
}

fn optional_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), format_price)
}

fn year_built(listing: &Listing) -> String {
    listing
        .year_built
        .map_or_else(|| "-".to_string(), |year| year.to_string())
}

pub fn listing_card(index: usize, listing: &Listing) -> String {
    let per_area = listing
        .price_per_area()
        .map(|ppa| format!("   {} per m2\n", format_price(ppa)))
        .unwrap_or_default();

    format!(
        "{}. {} ({})\n   📍 {}\n   {} m2, {} rooms, built {}, {} / {}\n{}   {} - {}  (ID: {})\n",
        index,
        listing.title,
        format_price(listing.price as f64),
        listing.address,
        listing.area,
        listing.rooms,
        year_built(listing),
        listing.property_type,
        listing.condition,
        per_area,
        listing.city,
        listing.district,
        listing.id
    )
}

/// Full view of one listing
pub fn listing_detail(listing: &Listing) -> String {
    format!(
        "🏠 {}\n   📍 {}\n   Price:           {}\n   Price per m2:    {}\n   Area:            {} m2\n   Rooms:           {}\n   Built:           {}\n   Type:            {}\n   Condition:       {}\n   Listed:          {}\n",
        listing.title,
        listing.address,
        format_price(listing.price as f64),
        optional_price(listing.price_per_area()),
        listing.area,
        listing.rooms,
        year_built(listing),
        listing.property_type,
        listing.condition,
        listing.created_at.format("%Y-%m-%d")
    )
}

/// Compact one-line-per-listing suggestions
pub fn similar_block(listings: &[Listing]) -> String {
    listings
        .iter()
        .map(|l| {
            format!(
                "   #{} {} | {} | {} m2 - {}\n",
                l.id,
                l.title,
                format_price(l.price as f64),
                l.area,
                l.district
            )
        })
        .collect()
}

pub fn summary_block(summary: &OverallSummary) -> String {
    format!(
        "📊 Market overview\n   Listings:        {}\n   Average price:   {}\n   Price per m2:    {}\n   Average area:    {:.0} m2\n",
        summary.count,
        format_price(summary.avg_price),
        format_price(summary.avg_price_per_area),
        summary.avg_area
    )
}

/// Totals reported by the services for the whole market
pub fn overall_stats_block(stats: &OverallStats) -> String {
    let area = stats
        .avg_area
        .map_or_else(|| "-".to_string(), |area| format!("{:.0} m2", area));

    format!(
        "🌐 Whole market\n   Listings:        {}\n   Average price:   {}\n   Price range:     {} to {}\n   Price per m2:    {}\n   Average area:    {}\n",
        stats.total_listings,
        optional_price(stats.avg_price),
        optional_price(stats.min_price),
        optional_price(stats.max_price),
        optional_price(stats.avg_price_per_m2),
        area
    )
}

pub fn property_type_table(types: &[PropertyTypeAggregate]) -> String {
    let header = format!("{:<12} {:>8} {:>16} {:>16}\n", "Type", "Count", "Avg price", "Per m2");
    let rows: String = types
        .iter()
        .map(|t| {
            format!(
                "{:<12} {:>8} {:>16} {:>16}\n",
                t.property_type,
                t.count,
                format_price(t.avg_price),
                format_price(t.avg_price_per_m2)
            )
        })
        .collect();
    header + &rows
}

pub fn extremes_block(extremes: &CityExtremes, city_count: usize) -> String {
    let (expensive, affordable) = match extremes {
        CityExtremes::NoData => ("-".to_string(), "-".to_string()),
        CityExtremes::Found {
            most_expensive,
            most_affordable,
        } => (
            format!(
                "{} ({} per m2)",
                most_expensive.city,
                format_price(most_expensive.avg_price_per_m2)
            ),
            format!(
                "{} ({} per m2)",
                most_affordable.city,
                format_price(most_affordable.avg_price_per_m2)
            ),
        ),
    };

    format!(
        "   Most expensive:  {}\n   Most affordable: {}\n   Cities covered:  {}\n",
        expensive, affordable, city_count
    )
}

pub fn city_table(cities: &[CityAggregate]) -> String {
    let header = format!(
        "{:<16} {:>8} {:>16} {:>16} {:>10}\n",
        "City", "Count", "Avg price", "Per m2", "Avg area"
    );
    let rows: String = cities
        .iter()
        .map(|city| {
            format!(
                "{:<16} {:>8} {:>16} {:>16} {:>8.0}m2\n",
                city.city,
                city.count,
                format_price(city.avg_price),
                format_price(city.avg_price_per_m2),
                city.avg_area
            )
        })
        .collect();
    header + &rows
}

fn bucket_label(bucket: PriceBucket, bands: &PriceBands) -> String {
    match bucket {
        PriceBucket::Below => format!("under {}", format_price(bands.lower)),
        PriceBucket::Between => format!(
            "{} to {}",
            format_price(bands.lower),
            format_price(bands.upper)
        ),
        PriceBucket::Above => format!("{} and over", format_price(bands.upper)),
    }
}

/// Horizontal bar chart of the price-per-area bands
pub fn distribution_chart(dist: &PriceDistribution, bands: &PriceBands) -> String {
    const WIDTH: usize = 30;
    let total = dist.total().max(1);

    [PriceBucket::Below, PriceBucket::Between, PriceBucket::Above]
        .into_iter()
        .map(|bucket| {
            let count = dist.get(bucket);
            format!(
                "   {:<28} {:<width$} {}\n",
                bucket_label(bucket, bands),
                "█".repeat(count * WIDTH / total),
                count,
                width = WIDTH
            )
        })
        .collect()
}

pub fn range_block(range: Option<PriceRange>) -> String {
    match range {
        Some(r) => format!(
            "   Highest per m2:  {}\n   Lowest per m2:   {}\n",
            format_price(r.max),
            format_price(r.min)
        ),
        None => "   Highest per m2:  -\n   Lowest per m2:   -\n".to_string(),
    }
}

/// Price-per-area trend as computed by the analysis service
pub fn trends_block(trends: &PriceTrends) -> String {
    let (low, high) = trends
        .price_range_per_m2
        .map_or_else(
            || ("-".to_string(), "-".to_string()),
            |r| (format_price(r.min), format_price(r.max)),
        );

    format!(
        "   Market per m2:   {}\n   Market range:    {} to {}\n",
        format_price(trends.avg_price_per_m2),
        low,
        high
    )
}

pub fn prediction_block(prediction: &PredictionResponse) -> String {
    let features = &prediction.input_features;
    let model = if prediction.model_info.model_type.is_empty() {
        String::new()
    } else {
        format!("   Model:           {}\n", prediction.model_info.model_type)
    };

    format!(
        "🎯 Predicted price: {}\n   Price per m2:    {}\n   Confidence:      {} ({:.0}%)\n   Input:           {} m2, {} rooms, built {}, {} - {}, {} / {}\n{}",
        format_price(prediction.predicted_price as f64),
        format_price(prediction.price_per_m2 as f64),
        confidence_label(prediction.confidence),
        prediction.confidence * 100.0,
        features.area,
        features.rooms,
        features.year_built,
        features.city,
        features.district,
        features.property_type,
        features.condition,
        model
    )
}
