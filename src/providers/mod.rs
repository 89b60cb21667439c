pub mod ai_service;
pub mod error;
pub mod fallback;
pub mod listings_api;
pub mod traits;

pub use ai_service::AiServiceClient;
pub use error::ProviderError;
pub use fallback::FallbackSource;
pub use listings_api::ListingsApiClient;
pub use traits::MarketDataSource;
