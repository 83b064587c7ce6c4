use std::path::PathBuf;

use bezrealitky_scout::{
    collect, load_config, BezrealitkyScraper, OfferBuilder, OfferType, Region, SearchParams,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bezrealitky-scout")]
#[command(about = "Fetch bezrealitky.cz listings and print one summary line per offer")]
struct Cli {
    /// Kind of offer to search for
    #[arg(long, value_enum, default_value_t = OfferType::Prodej)]
    offer_type: OfferType,

    /// Search area
    #[arg(long, value_enum, default_value_t = Region::Czechia)]
    region: Region,

    /// Estate type code, e.g. `byt`
    #[arg(long)]
    estate_type: Option<String>,

    /// Disposition code, e.g. `3-kk`
    #[arg(long)]
    disposition: Option<String>,

    /// Also write the offers as JSON to this file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config()?;
    let params = SearchParams {
        offer_type: cli.offer_type,
        boundary: cli.region.boundary(),
        estate_type: cli.estate_type,
        disposition: cli.disposition,
    };

    let scraper = BezrealitkyScraper::with_params(&config, params)?;
    let mut builder = OfferBuilder::new();
    let run = collect(&scraper, &config.listing_base_url, &mut builder).await?;

    for offer in &run.offers {
        match offer.summary() {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("Skipping summary for {}: {}", offer, err),
        }
    }
    println!("{} offers", run.count);

    if let Some(path) = cli.output {
        let json = serde_json::to_string_pretty(&run.offers)?;
        tokio::fs::write(&path, json).await?;
        info!("Saved {} offers to {}", run.count, path.display());
    }

    Ok(())
}
