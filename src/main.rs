use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use prop_analyzer::analysis::{
    city_extremes, overall_summary, price_distribution, price_per_area_range,
};
use prop_analyzer::app::{
    load_listing_detail, load_market, request_prediction, ListingsView, PredictionOutcome,
};
use prop_analyzer::config::Config;
use prop_analyzer::display;
use prop_analyzer::models::{Condition, FilterCriteria, PredictionRequest, PropertyType};
use prop_analyzer::providers::{AiServiceClient, FallbackSource, ListingsApiClient};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prop-analyzer", about = "Real-estate market analytics in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse listings, optionally narrowed by filters
    Listings(ListingsArgs),
    /// Show one listing and a few others to look at next
    Listing { id: u64 },
    /// Market overview, city comparison and price distribution
    Dashboard {
        #[arg(long, value_enum, default_value_t = Tab::Overview)]
        tab: Tab,
    },
    /// Estimate a property's price with the prediction model
    Predict(PredictArgs),
}

#[derive(Args)]
struct ListingsArgs {
    /// Substring of the city name (case-sensitive)
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    min_price: Option<u64>,
    /// Inclusive upper bound; 0 keeps only free listings, omit for no limit
    #[arg(long)]
    max_price: Option<u64>,
    #[arg(long = "type", value_enum)]
    property_type: Option<PropertyTypeArg>,
    /// Room count as shown in the selector: 1, 2, 3, 4 or 5+
    #[arg(long)]
    rooms: Option<String>,
    /// Write the filtered listings to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PredictArgs {
    #[arg(long)]
    area: f64,
    #[arg(long, default_value_t = 2)]
    rooms: u32,
    #[arg(long)]
    year_built: i32,
    #[arg(long)]
    city: String,
    #[arg(long)]
    district: String,
    #[arg(long = "type", value_enum, default_value_t = PropertyTypeArg::Apartment)]
    property_type: PropertyTypeArg,
    #[arg(long, value_enum, default_value_t = ConditionArg::Normal)]
    condition: ConditionArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tab {
    Overview,
    Cities,
    Trends,
}

#[derive(Clone, Copy, ValueEnum)]
enum PropertyTypeArg {
    Apartment,
    Villa,
    Office,
    Store,
    Land,
}

impl From<PropertyTypeArg> for PropertyType {
    fn from(arg: PropertyTypeArg) -> Self {
        match arg {
            PropertyTypeArg::Apartment => PropertyType::Apartment,
            PropertyTypeArg::Villa => PropertyType::Villa,
            PropertyTypeArg::Office => PropertyType::Office,
            PropertyTypeArg::Store => PropertyType::Store,
            PropertyTypeArg::Land => PropertyType::Land,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ConditionArg {
    New,
    Renovated,
    Normal,
    Old,
}

impl From<ConditionArg> for Condition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::New => Condition::New,
            ConditionArg::Renovated => Condition::Renovated,
            ConditionArg::Normal => Condition::Normal,
            ConditionArg::Old => Condition::Old,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    info!("🏠 PropAnalyzer");

    match cli.command {
        Command::Listings(args) => run_listings(&config, args).await,
        Command::Listing { id } => run_listing(&config, id).await,
        Command::Dashboard { tab } => run_dashboard(&config, tab).await,
        Command::Predict(args) => run_predict(&config, args).await,
    }
}

async fn run_listings(config: &Config, args: ListingsArgs) -> anyhow::Result<()> {
    let api = ListingsApiClient::new(&config.listings_api_url, config.http_timeout)?;
    let fallback = FallbackSource::new();
    let snapshot = load_market(&api, &fallback).await;
    if let Some(warning) = &snapshot.warning {
        println!("⚠️  {}\n", warning);
    }

    let criteria = FilterCriteria {
        city: args.city,
        min_price: args.min_price,
        max_price: args.max_price,
        property_type: args.property_type.map(Into::into),
        rooms: args.rooms,
    };
    let view = ListingsView::new(snapshot.listings).with_criteria(criteria);

    print!("{}", display::summary_block(&overall_summary(view.visible())));
    println!();

    if view.visible().is_empty() {
        println!("🏠 No listings found. Try changing the filters.");
    } else {
        println!("Listings ({} of {})\n", view.visible().len(), view.total());
        for (i, listing) in view.visible().iter().enumerate() {
            println!("{}", display::listing_card(i + 1, listing));
        }
    }

    if let Some(path) = args.output {
        let json = serde_json::to_string_pretty(view.visible())?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} listings to {}", view.visible().len(), path.display());
    }

    Ok(())
}

async fn run_listing(config: &Config, id: u64) -> anyhow::Result<()> {
    let api = ListingsApiClient::new(&config.listings_api_url, config.http_timeout)?;
    let fallback = FallbackSource::new();
    let detail = load_listing_detail(&api, &fallback, id).await;
    if let Some(warning) = &detail.warning {
        println!("⚠️  {}\n", warning);
    }

    match &detail.listing {
        Some(listing) => print!("{}", display::listing_detail(listing)),
        None => println!("🏠 Listing {} was not found.", id),
    }

    if !detail.similar.is_empty() {
        println!("\n🔎 Similar listings");
        print!("{}", display::similar_block(&detail.similar));
    }

    Ok(())
}

async fn run_dashboard(config: &Config, tab: Tab) -> anyhow::Result<()> {
    let api = ListingsApiClient::new(&config.listings_api_url, config.http_timeout)?;
    let ai = AiServiceClient::new(&config.ai_api_url, config.http_timeout)?;
    let fallback = FallbackSource::new();

    let (snapshot, analysis) = tokio::join!(load_market(&api, &fallback), ai.analyze());
    let snapshot = match analysis {
        Ok(analysis) => snapshot.with_analysis(analysis),
        Err(e) => {
            warn!("Error fetching analysis data: {}", e);
            snapshot
        }
    };

    if let Some(warning) = &snapshot.warning {
        println!("⚠️  {}\n", warning);
    }

    match tab {
        Tab::Overview => {
            print!("{}", display::summary_block(&overall_summary(&snapshot.listings)));
            if let Some(overall) = &snapshot.overall {
                println!();
                print!("{}", display::overall_stats_block(overall));
            }
            if !snapshot.property_types.is_empty() {
                println!("\n🏘️  By property type");
                print!("{}", display::property_type_table(&snapshot.property_types));
            }
            if !snapshot.recommendations.is_empty() {
                println!("\n💡 Recommendations");
                for recommendation in &snapshot.recommendations {
                    println!("   • {}", recommendation);
                }
            }
        }
        Tab::Cities => {
            println!("🏙️  City comparison");
            print!(
                "{}",
                display::extremes_block(&city_extremes(&snapshot.cities), snapshot.cities.len())
            );
            println!();
            print!("{}", display::city_table(&snapshot.cities));
        }
        Tab::Trends => {
            println!("📈 Price per m2 distribution");
            let dist = price_distribution(&snapshot.listings, &config.price_bands);
            print!("{}", display::distribution_chart(&dist, &config.price_bands));
            println!();
            print!("{}", display::range_block(price_per_area_range(&snapshot.listings)));
            if let Some(trends) = &snapshot.price_trends {
                print!("{}", display::trends_block(trends));
            }
        }
    }

    Ok(())
}

async fn run_predict(config: &Config, args: PredictArgs) -> anyhow::Result<()> {
    let ai = AiServiceClient::new(&config.ai_api_url, config.http_timeout)?;
    let request = PredictionRequest {
        area: args.area,
        rooms: args.rooms,
        year_built: args.year_built,
        city: args.city,
        district: args.district,
        property_type: args.property_type.into(),
        condition: args.condition.into(),
    };

    let outcome = request_prediction(&ai, &request).await?;
    if let PredictionOutcome::Sample { reason, .. } = &outcome {
        println!("⚠️  {}", reason);
        println!("   Showing a rough sample estimate instead.\n");
    }
    print!("{}", display::prediction_block(outcome.prediction()));

    Ok(())
}
