use super::{Condition, PropertyType};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted area range on the prediction form, in square meters
pub const AREA_RANGE: RangeInclusive<f64> = 10.0..=1000.0;
/// Accepted construction years (Solar Hijri calendar)
pub const YEAR_BUILT_RANGE: RangeInclusive<i32> = 1300..=1402;
/// Room counts the prediction service accepts
pub const ROOMS_RANGE: RangeInclusive<u32> = 0..=10;

/// Rejected prediction form input
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("area must be between {} and {} square meters, got {0}", AREA_RANGE.start(), AREA_RANGE.end())]
    Area(f64),
    #[error("year built must be between {} and {}, got {0}", YEAR_BUILT_RANGE.start(), YEAR_BUILT_RANGE.end())]
    YearBuilt(i32),
    #[error("rooms must be between {} and {}, got {0}", ROOMS_RANGE.start(), ROOMS_RANGE.end())]
    Rooms(u32),
    #[error("district is required")]
    MissingDistrict,
}

/// Property features sent to `POST /predict/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub area: f64,
    pub rooms: u32,
    pub year_built: i32,
    pub city: String,
    pub district: String,
    pub property_type: PropertyType,
    pub condition: Condition,
}

impl PredictionRequest {
    /// Check the form constraints before anything leaves the client
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !AREA_RANGE.contains(&self.area) {
            return Err(ValidationError::Area(self.area));
        }
        if !YEAR_BUILT_RANGE.contains(&self.year_built) {
            return Err(ValidationError::YearBuilt(self.year_built));
        }
        if !ROOMS_RANGE.contains(&self.rooms) {
            return Err(ValidationError::Rooms(self.rooms));
        }
        if self.district.trim().is_empty() {
            return Err(ValidationError::MissingDistrict);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_type: String,
    #[serde(default)]
    pub is_trained: bool,
    #[serde(default)]
    pub features_used: Vec<String>,
}

/// Answer of the prediction service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_price: u64,
    /// In `[0, 1]`
    pub confidence: f64,
    pub price_per_m2: u64,
    pub input_features: PredictionRequest,
    #[serde(default)]
    pub model_info: ModelInfo,
}
