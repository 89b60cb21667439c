use crate::analysis::{city_aggregates, filter_listings, similar_listings};
use crate::models::prediction::ValidationError;
use crate::models::{
    CityAggregate, FilterCriteria, Listing, MarketAnalysis, OverallStats, PredictionRequest,
    PredictionResponse, PriceTrends, PropertyTypeAggregate,
};
use crate::providers::fallback::sample_prediction;
use crate::providers::{AiServiceClient, MarketDataSource, ProviderError};
use thiserror::Error;
use tracing::{info, warn};

/// How many other listings the detail view suggests
pub const SIMILAR_LISTINGS: usize = 3;

/// Data the views render from, plus a user-facing warning when the
/// primary source failed and fallback data was substituted
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub listings: Vec<Listing>,
    pub cities: Vec<CityAggregate>,
    /// Server-side totals; absent when statistics came from local data
    pub overall: Option<OverallStats>,
    pub property_types: Vec<PropertyTypeAggregate>,
    pub price_trends: Option<PriceTrends>,
    pub recommendations: Vec<String>,
    pub source: &'static str,
    pub warning: Option<String>,
}

/// Fetch listings and statistics, substituting fallback data on failure
pub async fn load_market(
    primary: &dyn MarketDataSource,
    fallback: &dyn MarketDataSource,
) -> MarketSnapshot {
    let (listings, stats) = tokio::join!(primary.fetch_listings(), primary.fetch_stats());
    let mut warnings = Vec::new();

    let (listings, source) = match listings {
        Ok(listings) => (listings, primary.source_name()),
        Err(e) => {
            warn!("Error fetching listings from {}: {}", primary.source_name(), e);
            warnings.push(format!(
                "Could not load listings ({}). Showing sample data.",
                e.user_message()
            ));
            let listings = fallback.fetch_listings().await.unwrap_or_else(|e| {
                warn!("Fallback source failed too: {}", e);
                Vec::new()
            });
            (listings, fallback.source_name())
        }
    };

    let (cities, overall) = match stats {
        Ok(stats) => (stats.by_city, stats.overall),
        Err(e) => {
            warn!("Error fetching city statistics: {}", e);
            warnings.push(format!(
                "Could not load city statistics ({}). Figures are computed from the shown listings.",
                e.user_message()
            ));
            (city_aggregates(&listings), None)
        }
    };

    info!("Loaded {} listings and {} cities from {}", listings.len(), cities.len(), source);

    MarketSnapshot {
        listings,
        cities,
        overall,
        property_types: Vec::new(),
        price_trends: None,
        recommendations: Vec::new(),
        source,
        warning: (!warnings.is_empty()).then(|| warnings.join(" ")),
    }
}

impl MarketSnapshot {
    /// Merge the analysis service's view of the market.
    ///
    /// Its city breakdown replaces ours when non-empty; its totals only
    /// fill in when the statistics endpoint gave none.
    pub fn with_analysis(mut self, analysis: MarketAnalysis) -> Self {
        if !analysis.city_analysis.is_empty() {
            self.cities = analysis.city_analysis;
        }
        if self.overall.is_none() {
            self.overall = analysis.overall_stats;
        }
        self.property_types = analysis.property_type_analysis;
        self.price_trends = analysis.price_trends;
        self.recommendations = analysis.recommendations;
        self
    }
}

/// One listing plus a few others to browse next
#[derive(Debug, Clone)]
pub struct ListingDetail {
    /// `None` when neither source knows the id
    pub listing: Option<Listing>,
    pub similar: Vec<Listing>,
    pub warning: Option<String>,
}

/// Fetch listing `id` and its suggestions, falling back to sample data
pub async fn load_listing_detail(
    primary: &dyn MarketDataSource,
    fallback: &dyn MarketDataSource,
    id: u64,
) -> ListingDetail {
    let (listing, others) = tokio::join!(primary.fetch_listing(id), primary.fetch_listings());
    let mut warning = None;

    let listing = match listing {
        Ok(listing) => Some(listing),
        Err(e) => {
            warn!("Error fetching listing {}: {}", id, e);
            warning = Some(format!(
                "Could not load listing {} ({}). Showing sample data.",
                id,
                e.user_message()
            ));
            fallback.fetch_listing(id).await.ok()
        }
    };

    let others = match others {
        Ok(others) => others,
        Err(e) => {
            warn!("Error fetching similar listings: {}", e);
            fallback.fetch_listings().await.unwrap_or_default()
        }
    };

    ListingDetail {
        listing,
        similar: similar_listings(&others, id, SIMILAR_LISTINGS),
        warning,
    }
}

/// Listing page state: the full snapshot, the active criteria and the
/// listings they select. Every change produces a new value.
#[derive(Debug, Clone, Default)]
pub struct ListingsView {
    all: Vec<Listing>,
    criteria: FilterCriteria,
    visible: Vec<Listing>,
}

impl ListingsView {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            visible: listings.clone(),
            all: listings,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn with_criteria(self, criteria: FilterCriteria) -> Self {
        let visible = filter_listings(&self.all, &criteria);
        Self {
            all: self.all,
            criteria,
            visible,
        }
    }

    pub fn cleared(self) -> Self {
        self.with_criteria(FilterCriteria::default())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> &[Listing] {
        &self.visible
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("prediction failed: {}", .0.user_message())]
    Service(#[from] ProviderError),
}

/// Result of a prediction request as the user sees it
#[derive(Debug, Clone)]
pub enum PredictionOutcome {
    Live(PredictionResponse),
    /// The model was unavailable; a heuristic estimate stands in
    Sample {
        prediction: PredictionResponse,
        reason: String,
    },
}

impl PredictionOutcome {
    pub fn prediction(&self) -> &PredictionResponse {
        match self {
            PredictionOutcome::Live(p) => p,
            PredictionOutcome::Sample { prediction, .. } => prediction,
        }
    }
}

/// Validate the form, then ask the service; falls back to a sample
/// estimate only when the service reports itself unavailable
pub async fn request_prediction(
    client: &AiServiceClient,
    request: &PredictionRequest,
) -> Result<PredictionOutcome, PredictionError> {
    request.validate()?;

    match client.predict(request).await {
        Ok(prediction) => Ok(PredictionOutcome::Live(prediction)),
        Err(e) if e.is_unavailable() => {
            warn!("Prediction service unavailable: {}", e);
            Ok(PredictionOutcome::Sample {
                prediction: sample_prediction(request),
                reason: e.user_message(),
            })
        }
        Err(e) => Err(e.into()),
    }
}
