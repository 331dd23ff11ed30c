// src/bin/places_search.rs
// DOCUMENTATION: Command line driver for the Places client
// PURPOSE: Run one Places API request from the terminal and print the result

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use geo_types::Point;
use places_query::{
    Config, ParamEncoding, PlacesClient, PlacesRequest, PlacesResponse, ResultFormat,
};
use validator::Validate;

#[derive(Debug, Parser)]
#[command(name = "places-search", version, about = "Query the Google Places web API")]
struct Cli {
    /// Response format (json, xml); defaults to PLACES_RESULT_FORMAT
    #[arg(long, global = true)]
    format: Option<String>,

    /// Send sensor=true (overrides PLACES_SENSOR)
    #[arg(long, global = true, overrides_with = "no_sensor")]
    sensor: bool,

    /// Send sensor=false (overrides PLACES_SENSOR)
    #[arg(long, global = true, overrides_with = "sensor")]
    no_sensor: bool,

    /// Response language
    #[arg(long, global = true)]
    language: Option<String>,

    /// Extra query parameter, repeatable (e.g. --param type=restaurant)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param, global = true)]
    params: Vec<(String, String)>,

    /// Percent-encode parameter values
    #[arg(long, global = true)]
    percent_encode: bool,

    /// Print the request URL without sending it
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Places around a point
    Nearby(AreaArgs),
    /// Place ids around a point
    Radar(AreaArgs),
    /// Free-text search
    Text(TextArgs),
    /// Following page of a previous search
    NextPage { token: String },
    /// Details of a place by its reference
    Details { reference: String },
}

#[derive(Debug, Args, Validate)]
struct AreaArgs {
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Meters
    #[arg(long, default_value_t = 1000)]
    #[validate(range(min = 1, max = 50000))]
    radius: u32,
}

#[derive(Debug, Args, Validate)]
struct TextArgs {
    #[validate(length(min = 1))]
    query: String,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Sensor value given on the command line, if any
    fn sensor_override(&self) -> Option<bool> {
        match (self.sensor, self.no_sensor) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl Command {
    fn to_request(&self) -> Result<PlacesRequest, places_query::PlacesError> {
        let request = match self {
            Command::Nearby(area) => {
                area.validate()?;
                PlacesRequest::nearby_point(Point::new(area.lng, area.lat), area.radius)
            }
            Command::Radar(area) => {
                area.validate()?;
                PlacesRequest::radar_point(Point::new(area.lng, area.lat), area.radius)
            }
            Command::Text(text) => {
                text.validate()?;
                PlacesRequest::text(text.query.clone())
            }
            Command::NextPage { token } => PlacesRequest::next_page(token.clone()),
            Command::Details { reference } => PlacesRequest::details(reference.clone()),
        };
        Ok(request)
    }
}

fn init_logging(config: &Config) {
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // 2. Load configuration
    let config = Config::from_env();
    init_logging(&config);
    config.validate().map_err(anyhow::Error::msg)?;

    // 3. Build the request
    let format = cli
        .format
        .as_deref()
        .map(ResultFormat::from)
        .unwrap_or_else(|| config.result_format.clone());

    let mut request = cli
        .command
        .to_request()?
        .with_sensor(cli.sensor_override().unwrap_or(config.sensor))
        .with_language(cli.language.clone().unwrap_or_else(|| config.language.clone()))
        .with_result_format(format);

    for (name, value) in &cli.params {
        request = request.with_param(name.clone(), value.clone())?;
    }

    // 4. Run it
    let mut client = PlacesClient::from_config(&config).context("Failed to create Places client")?;
    if cli.percent_encode {
        client = client.with_encoding(ParamEncoding::Percent);
    }

    if cli.dry_run {
        println!("{}", client.request_url(&request));
        return Ok(());
    }

    let response = client
        .execute(&request)
        .await
        .with_context(|| format!("Google Places {} request failed", request.kind()))?;

    match &response {
        PlacesResponse::Json(value) => {
            log::info!(
                "Google Places status: {}",
                response.status().unwrap_or("unknown")
            );
            if let Some(token) = response.next_page_token() {
                log::info!("More results available, next page token: {}", token);
            }
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        PlacesResponse::Raw(body) => println!("{}", body),
    }

    Ok(())
}
