use anyhow::{Context, Result};
use chrono::{Duration as Days, Utc};
use clap::{Parser, ValueEnum};
use houser::models::pipeline::{by_price, by_rooms, min_rooms};
use houser::models::{filter, ordered_by, Listing, TransactionType};
use houser::providers::{NestoriaConfig, NestoriaRepo, Query, Repository};
use houser::render;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transaction {
    Rent,
    Buy,
    Share,
}

impl From<Transaction> for TransactionType {
    fn from(transaction: Transaction) -> Self {
        match transaction {
            Transaction::Rent => TransactionType::Rent,
            Transaction::Buy => TransactionType::Buy,
            Transaction::Share => TransactionType::Share,
        }
    }
}

/// Search Nestoria for flats and houses and print a digest
#[derive(Debug, Parser)]
#[command(name = "houser", version)]
struct Args {
    /// Country whose Nestoria API is queried
    #[arg(long, default_value = "deutschland")]
    country: String,

    /// Query this API host instead of the country's one
    #[arg(long)]
    endpoint: Option<String>,

    /// Place to search, can be repeated
    #[arg(long = "city", required = true)]
    cities: Vec<String>,

    #[arg(long, value_enum, default_value_t = Transaction::Rent)]
    transaction: Transaction,

    #[arg(long)]
    room_min: Option<f64>,
    #[arg(long)]
    room_max: Option<f64>,
    #[arg(long)]
    price_min: Option<u32>,
    #[arg(long)]
    price_max: Option<u32>,
    #[arg(long)]
    area_min: Option<u32>,
    #[arg(long)]
    area_max: Option<u32>,

    /// Only listings updated within this many days, 0 disables the filter
    #[arg(long, default_value_t = 31)]
    updated_within_days: u32,

    /// Minimum rooms for the "roomy" section of the digest
    #[arg(long, default_value_t = 2.5)]
    filter_rooms: f64,

    /// Write an HTML digest to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write all listings as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Ask for pretty responses and log them
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn query(&self) -> Query {
        let mut query = Query::new()
            .transaction_type(self.transaction.into())
            .rooms(self.room_min, self.room_max)
            .price(self.price_min, self.price_max)
            .area(self.area_min, self.area_max);
        if self.updated_within_days > 0 {
            query = query.updated_since(Utc::now() - Days::days(self.updated_within_days.into()));
        }
        query
    }

    fn repo(&self) -> Result<NestoriaRepo> {
        let config = NestoriaConfig {
            pretty: self.debug,
            timeout: Duration::from_secs(self.timeout_secs),
        };
        let repo = match &self.endpoint {
            Some(endpoint) => NestoriaRepo::with_config(endpoint, config),
            None => NestoriaRepo::for_country(&self.country, config),
        };
        repo.context("Can't create search object")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("🏠 Houser {}", env!("CARGO_PKG_VERSION"));

    let repo = args.repo()?;
    info!("Searching {} on {}", repo.source_name(), repo.endpoint());

    let base_query = args.query();
    let mut sections = Vec::new();
    let mut everything: Vec<Listing> = Vec::new();

    for city in &args.cities {
        let query = base_query.clone().city(city.as_str());
        let mut listings = repo
            .search(&query)
            .await
            .with_context(|| format!("Error while searching {}", city))?;

        ordered_by(&[&by_price, &by_rooms]).sort(&mut listings);

        println!("{}\n===================", city);
        render::write_table(&mut io::stdout().lock(), &listings)?;
        println!();

        let roomy = filter(&listings, &[&min_rooms(args.filter_rooms)]);
        info!(
            "{}: {} listings, {} with at least {} rooms",
            city,
            listings.len(),
            roomy.len(),
            args.filter_rooms
        );

        sections.push(render::html_section(
            &format!("{}: sorted by price", city),
            &listings,
        ));
        sections.push(render::html_section(
            &format!("{}: only {} rooms or better", city, args.filter_rooms),
            &roomy,
        ));

        everything.extend(listings);
    }

    if let Some(path) = &args.html {
        tokio::fs::write(path, render::html_digest(&sections))
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved HTML digest to {}", path.display());
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&everything)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} listings to {}", everything.len(), path.display());
    }

    Ok(())
}
