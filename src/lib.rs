//! Client-side core of the PropAnalyzer market analytics tool: listing
//! filtering, derived statistics, and clients for the listings and
//! prediction services.

pub mod analysis;
pub mod app;
pub mod config;
pub mod display;
pub mod models;
pub mod providers;
