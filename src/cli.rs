use crate::types::observation::Preferences;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "runcast",
    version,
    about = "Find the best time to go for a run from the weather forecast"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Best (lowest difficulty) time to run for each forecast day
    Best(BestCommand),
    /// Score the current conditions
    Now(NowCommand),
    /// Resolve a city name or id
    Lookup(LookupCommand),
}

#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Directory holding runcast.toml and .runcast/local.toml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
    /// Where API responses are cached
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// Gzip'd OpenWeatherMap city list
    #[arg(long)]
    pub city_list: Option<PathBuf>,
    /// How to read timestamps: utc, city, or a fixed offset like -04:00
    #[arg(long, allow_hyphen_values = true)]
    pub timezone: Option<String>,
}

#[derive(Args, Clone)]
pub struct PreferenceArgs {
    /// Temperature (F) with the lowest difficulty
    #[arg(long, allow_hyphen_values = true, value_parser = finite_temperature)]
    pub optimal_temp: Option<f64>,
    /// Penalize cold more than heat
    #[arg(long, conflicts_with = "prefer_cold")]
    pub prefer_hot: bool,
    /// Penalize heat more than cold
    #[arg(long)]
    pub prefer_cold: bool,
    /// Favor early slots
    #[arg(long, conflicts_with = "no_prefer_early")]
    pub prefer_early: bool,
    /// Do not favor early slots
    #[arg(long)]
    pub no_prefer_early: bool,
}

impl PreferenceArgs {
    /// Layer the flags that were given over `prefs` from config.
    pub fn apply(&self, mut prefs: Preferences) -> Preferences {
        if let Some(optimal_temp) = self.optimal_temp {
            prefs.optimal_temp = optimal_temp;
        }
        if self.prefer_hot {
            prefs.prefer_cold = false;
        } else if self.prefer_cold {
            prefs.prefer_cold = true;
        }
        if self.prefer_early {
            prefs.prefer_early = true;
        } else if self.no_prefer_early {
            prefs.prefer_early = false;
        }
        prefs
    }
}

fn finite_temperature(value: &str) -> Result<f64, String> {
    let temp: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if temp.is_finite() {
        Ok(temp)
    } else {
        Err(format!("must be a finite number (found {value})"))
    }
}

#[derive(Args)]
pub struct BestCommand {
    /// City name, or numeric OpenWeatherMap city id
    pub city: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub preferences: PreferenceArgs,
}

#[derive(Args)]
pub struct NowCommand {
    /// City name, or numeric OpenWeatherMap city id
    pub city: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub preferences: PreferenceArgs,
}

#[derive(Args)]
pub struct LookupCommand {
    /// City name, or numeric OpenWeatherMap city id
    pub city: String,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preference_args(args: &[&str]) -> PreferenceArgs {
        let mut argv = vec!["runcast", "best", "London"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).expect("arguments should parse").command {
            Commands::Best(cmd) => cmd.preferences,
            _ => panic!("expected best command"),
        }
    }

    #[test]
    fn optimal_temp_accepts_negative_values() {
        let args = preference_args(&["--optimal-temp", "-5.5"]);
        assert_eq!(args.optimal_temp, Some(-5.5));
    }

    #[test]
    fn optimal_temp_rejects_non_finite_values() {
        for value in ["NaN", "inf", "-inf"] {
            let result =
                Cli::try_parse_from(["runcast", "best", "London", "--optimal-temp", value]);
            assert!(result.is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn no_flags_keep_config_preferences() {
        let config = Preferences {
            optimal_temp: 48.0,
            prefer_cold: false,
            prefer_early: true,
        };
        assert_eq!(preference_args(&[]).apply(config), config);
    }

    #[test]
    fn flags_override_config_in_both_directions() {
        let config = Preferences {
            optimal_temp: 48.0,
            prefer_cold: false,
            prefer_early: true,
        };
        let prefs = preference_args(&["--prefer-cold", "--no-prefer-early"]).apply(config);
        assert!(prefs.prefer_cold);
        assert!(!prefs.prefer_early);

        let prefs = preference_args(&["--prefer-hot", "--prefer-early", "--optimal-temp", "60"])
            .apply(Preferences::default());
        assert!(!prefs.prefer_cold);
        assert!(prefs.prefer_early);
        assert_eq!(prefs.optimal_temp, 60.0);
    }

    #[test]
    fn opposite_preference_flags_conflict() {
        let hot_and_cold =
            Cli::try_parse_from(["runcast", "best", "London", "--prefer-hot", "--prefer-cold"]);
        assert!(hot_and_cold.is_err());

        let early_and_not = Cli::try_parse_from([
            "runcast",
            "best",
            "London",
            "--prefer-early",
            "--no-prefer-early",
        ]);
        assert!(early_and_not.is_err());
    }
}
