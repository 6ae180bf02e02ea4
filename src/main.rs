mod aggregate;
mod cli;
mod config;
mod error;
mod forecast;
mod locations;
mod planner;
mod report;
mod scoring;
mod types;

use crate::error::Result;
use crate::forecast::api::{ApiClient, ApiRequest};
use crate::forecast::cache::ResponseCache;
use crate::forecast::{CurrentResponse, ForecastResponse};
use crate::locations::{CityDirectory, CityQuery};
use crate::types::config::{RuncastConfig, TimeZonePolicy};
use crate::types::observation::Preferences;
use crate::types::report::RunReport;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config files plus the command line overrides that apply to every command.
struct Session {
    config: RuncastConfig,
    directory: CityDirectory,
    cache: ResponseCache,
    timezone: TimeZonePolicy,
}

impl Session {
    fn open(source: &cli::SourceArgs) -> Result<Self> {
        let config = config::load_config(&source.config_dir)?.unwrap_or_default();
        let timezone = match &source.timezone {
            Some(value) => TimeZonePolicy::parse(value)?,
            None => config.timezone()?,
        };
        let cache_dir = source
            .cache_dir
            .clone()
            .unwrap_or_else(|| config.cache_dir());
        let city_list = source
            .city_list
            .clone()
            .unwrap_or_else(|| config.city_list_file());
        let max_age = Duration::from_secs(config.cache_max_age_minutes() * 60);

        Ok(Self {
            directory: CityDirectory::new(city_list),
            cache: ResponseCache::new(cache_dir, max_age),
            timezone,
            config,
        })
    }

    fn preferences(&self, args: &cli::PreferenceArgs) -> Preferences {
        args.apply(self.config.preferences())
    }

    fn client(&self) -> Result<ApiClient> {
        ApiClient::new(
            &self.config.base_url(),
            self.config.api_key(),
            self.config.timeout_secs(),
        )
    }
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Best(cmd) => {
            let session = Session::open(&cmd.source)?;
            let prefs = session.preferences(&cmd.preferences);
            let city = locations::resolve(&session.directory, &CityQuery::parse(&cmd.city))?;
            tracing::info!(%city, "planning runs");

            let client = session.client()?;
            let body = session
                .cache
                .fetch(&client, &ApiRequest::ForecastById(city.id), &city.name)?;
            let forecast: ForecastResponse = serde_json::from_value(body)?;
            let offset = session.timezone.offset(forecast.timezone_offset());

            let plan = planner::plan_best_times(&forecast.list, &prefs, offset);
            tracing::info!(
                scored = plan.scored,
                skipped = plan.skipped,
                days = plan.best.len(),
                "scored forecast"
            );
            let run_report = RunReport::new(&city.name, city.id, &plan.best, plan.skipped);
            let rendered = report::render(&run_report, output_format(cmd.format))?;
            println!("{rendered}");

            if run_report.has_warnings() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Now(cmd) => {
            let session = Session::open(&cmd.source)?;
            let prefs = session.preferences(&cmd.preferences);
            let city = locations::resolve(&session.directory, &CityQuery::parse(&cmd.city))?;

            let client = session.client()?;
            let body = session
                .cache
                .fetch(&client, &ApiRequest::CurrentById(city.id), &city.name)?;
            let current: CurrentResponse = serde_json::from_value(body)?;
            let offset = session.timezone.offset(current.timezone);

            let scored = planner::score_current(&current.entry, &prefs, offset)?;
            let rendered = match cmd.format {
                cli::ReportFormat::Json => report::json::current_to_json(&city.name, &scored)?,
                cli::ReportFormat::Md => report::md::current_to_markdown(&city.name, &scored),
            };
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Lookup(cmd) => {
            let session = Session::open(&cmd.source)?;
            let city = locations::resolve(&session.directory, &CityQuery::parse(&cmd.city))?;
            println!("{city}");
            if let Some(record) = session.directory.record(city.id) {
                println!(
                    "Country: {}, Coord: {:.4}, {:.4}",
                    record.country, record.coord.lat, record.coord.lon
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
