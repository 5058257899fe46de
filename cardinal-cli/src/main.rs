use std::time::Duration;

use cardinal_geocode::{API_KEY_VAR, GeocoderConfig, GoogleGeocoder};
use cardinal_logic::{
    BearingCalculator, CachedGeocoder, Coordinate, DirectionFinder, DirectionReport,
    ZeroDistancePolicy, prelude::*,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

#[derive(Parser)]
#[command(name = "cardinal", version, about = "Which way is one place from another")]
struct Cli {
    /// What to report when both points are the same
    #[arg(long, value_enum, global = true, default_value_t = Coincident::North)]
    coincident: Coincident,

    /// Also print the bearing in degrees
    #[arg(long, global = true)]
    degrees: bool,

    /// Print the full report as JSON
    #[arg(long, global = true, conflicts_with = "degrees")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Coincident {
    /// Treat it as due North
    North,
    /// Report no direction
    Undefined,
}

impl From<Coincident> for ZeroDistancePolicy {
    fn from(value: Coincident) -> Self {
        match value {
            Coincident::North => ZeroDistancePolicy::DueNorth,
            Coincident::Undefined => ZeroDistancePolicy::Undefined,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Geocode two place names and give the direction from the first to the second
    Places {
        /// Where to start from
        from: String,
        /// Where to point to
        to: String,
        /// Google Maps API key
        #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
        api_key: String,
        /// Override the geocoding endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Give the direction between two "<lat>,<lng>" coordinates
    Coords {
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,
    },
}

fn geocoder_config(
    api_key: String,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
) -> GeocoderConfig {
    let mut config = GeocoderConfig::new(api_key);
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

fn render(report: &DirectionReport, degrees: bool, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(report).context("Failed to serialize report");
    }

    Ok(match report.bearing {
        Some(bearing) if degrees => format!("{report} ({bearing})"),
        _ => report.to_string(),
    })
}

async fn run(cli: Cli) -> Result<String> {
    let policy = ZeroDistancePolicy::from(cli.coincident);

    let report = match cli.command {
        Commands::Places {
            from,
            to,
            api_key,
            endpoint,
            timeout_secs,
        } => {
            let config = geocoder_config(api_key, endpoint, timeout_secs);
            info!("Geocoding with {}", config.endpoint);
            let geocoder =
                GoogleGeocoder::new(config).context("Failed to set up geocoding client")?;
            let finder = DirectionFinder::with_policy(CachedGeocoder::new(geocoder), policy);
            finder.direction_between_places(&from, &to).await?
        }
        Commands::Coords { from, to } => {
            DirectionReport::compute(&BearingCalculator::new(policy), from, to)
        }
    };

    render(&report, cli.degrees, cli.json)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    colog::init();

    let cli = Cli::parse();
    let output = run(cli).await?;
    println!("{output}");

    Ok(())
}
