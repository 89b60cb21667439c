use crate::analysis::city_aggregates;
use crate::models::{
    Condition, Listing, MarketStats, ModelInfo, PredictionRequest, PredictionResponse,
    PropertyType,
};
use crate::providers::traits::MarketDataSource;
use crate::providers::ProviderError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

/// Locally bundled snapshot used when the listings API is unreachable
#[derive(Debug, Clone)]
pub struct FallbackSource {
    listings: Vec<Listing>,
}

impl FallbackSource {
    pub fn new() -> Self {
        Self {
            listings: sample_listings(),
        }
    }

    /// Fallback over a caller-provided snapshot
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl Default for FallbackSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for FallbackSource {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ProviderError> {
        info!("📋 Using {} bundled sample listings", self.listings.len());
        Ok(self.listings.clone())
    }

    async fn fetch_listing(&self, id: u64) -> Result<Listing, ProviderError> {
        self.listings
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: 404,
                message: format!("listing {id} is not in the sample data"),
            })
    }

    /// Only the per-city rows; there are no server-side totals offline
    async fn fetch_stats(&self) -> Result<MarketStats, ProviderError> {
        Ok(MarketStats {
            overall: None,
            by_city: city_aggregates(&self.listings),
        })
    }

    fn source_name(&self) -> &'static str {
        "fallback"
    }
}

fn created(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: u64,
    title: &str,
    district: &str,
    street: &str,
    price: u64,
    area: f64,
    rooms: u32,
    year_built: i32,
    property_type: PropertyType,
    condition: Condition,
    created_at: DateTime<Utc>,
) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        address: format!("Tehran, {district}, {street}"),
        city: "Tehran".to_string(),
        district: district.to_string(),
        price,
        area,
        rooms,
        year_built: Some(year_built),
        property_type,
        condition,
        created_at,
    }
}

/// Six typical Tehran listings
pub fn sample_listings() -> Vec<Listing> {
    vec![
        sample(
            1,
            "85 m2 new-build apartment in Elahieh",
            "Elahieh",
            "Fereshteh St",
            8_500_000_000,
            85.0,
            2,
            1400,
            PropertyType::Apartment,
            Condition::New,
            created(15, 10, 30),
        ),
        sample(
            2,
            "200 m2 villa in Farmanieh",
            "Farmanieh",
            "Bahonar St",
            25_000_000_000,
            200.0,
            4,
            1395,
            PropertyType::Villa,
            Condition::Renovated,
            created(14, 15, 20),
        ),
        sample(
            3,
            "120 m2 apartment in Niavaran",
            "Niavaran",
            "Yaser St",
            12_000_000_000,
            120.0,
            3,
            1398,
            PropertyType::Apartment,
            Condition::Normal,
            created(13, 9, 15),
        ),
        sample(
            4,
            "75 m2 apartment in Tajrish",
            "Tajrish",
            "Tajrish Sq",
            9_500_000_000,
            75.0,
            2,
            1399,
            PropertyType::Apartment,
            Condition::New,
            created(12, 14, 45),
        ),
        sample(
            5,
            "50 m2 shop in Pasdaran",
            "Pasdaran",
            "Artesh St",
            7_000_000_000,
            50.0,
            1,
            1390,
            PropertyType::Store,
            Condition::Normal,
            created(11, 11, 20),
        ),
        sample(
            6,
            "95 m2 apartment in Saadat Abad",
            "Saadat Abad",
            "Kaj Sq",
            11_000_000_000,
            95.0,
            2,
            1397,
            PropertyType::Apartment,
            Condition::Renovated,
            created(10, 16, 30),
        ),
    ]
}

/// Reference year for the sample prediction's age discount
const CURRENT_YEAR: i32 = 1402;
const BASE_PRICE_PER_M2: f64 = 80_000_000.0;
const PRICE_PER_EXTRA_ROOM: f64 = 500_000_000.0;
const DISCOUNT_PER_YEAR: f64 = 10_000_000.0;
const MIN_SAMPLE_PRICE: f64 = 1_000_000_000.0;

fn city_multiplier(city: &str) -> f64 {
    match city {
        "Tehran" => 1.5,
        "Mashhad" => 1.1,
        "Isfahan" => 1.0,
        "Shiraz" => 0.9,
        _ => 1.0,
    }
}

/// Rough heuristic estimate shown while the prediction model is not trained
pub fn sample_prediction(request: &PredictionRequest) -> PredictionResponse {
    let base = request.area * BASE_PRICE_PER_M2;
    let room_bonus = (request.rooms as f64 - 1.0) * PRICE_PER_EXTRA_ROOM;
    let age = (CURRENT_YEAR - request.year_built).max(0) as f64;
    let estimate = (base + room_bonus - age * DISCOUNT_PER_YEAR) * city_multiplier(&request.city);
    let predicted = estimate.max(MIN_SAMPLE_PRICE);

    let price_per_m2 = if request.area > 0.0 {
        (predicted / request.area).round() as u64
    } else {
        0
    };

    PredictionResponse {
        predicted_price: predicted.round() as u64,
        confidence: 0.82,
        price_per_m2,
        input_features: request.clone(),
        model_info: ModelInfo {
            model_type: "heuristic-sample".to_string(),
            is_trained: false,
            features_used: [
                "area",
                "rooms",
                "year_built",
                "city",
                "district",
                "property_type",
                "condition",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(city: &str, area: f64, rooms: u32, year_built: i32) -> PredictionRequest {
        PredictionRequest {
            area,
            rooms,
            year_built,
            city: city.to_string(),
            district: "Center".to_string(),
            property_type: PropertyType::Apartment,
            condition: Condition::Normal,
        }
    }

    #[test]
    fn test_sample_listings_are_well_formed() {
        let listings = sample_listings();
        assert_eq!(listings.len(), 6);
        assert!(listings.iter().all(|l| l.area > 0.0 && l.city == "Tehran"));

        let mut ids: Vec<u64> = listings.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn test_fallback_aggregates_match_listings() {
        let source = FallbackSource::new();
        let stats = source.fetch_stats().await.unwrap();
        assert!(stats.overall.is_none());
        let cities = stats.by_city;
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].city, "Tehran");
        assert_eq!(cities[0].count, 6);
    }

    #[tokio::test]
    async fn test_fallback_listing_lookup() {
        let source = FallbackSource::new();
        assert_eq!(source.fetch_listing(3).await.unwrap().district, "Niavaran");

        let err = source.fetch_listing(42).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 404, .. }));
    }

    #[test]
    fn test_sample_prediction_heuristic() {
        // 100 m2 * 80M + 1 extra room * 500M - 2 years * 10M, times 1.5 for Tehran
        let prediction = sample_prediction(&request("Tehran", 100.0, 2, 1400));
        assert_eq!(prediction.predicted_price, 12_720_000_000);
        assert_eq!(prediction.price_per_m2, 127_200_000);
        assert!(!prediction.model_info.is_trained);
        assert_eq!(prediction.input_features.city, "Tehran");
    }

    #[test]
    fn test_sample_prediction_has_floor() {
        let prediction = sample_prediction(&request("Tabriz", 10.0, 0, 1300));
        assert_eq!(prediction.predicted_price, 1_000_000_000);
    }
}
