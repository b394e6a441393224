use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use weathertool::summary::DEFAULT_UPCOMING_HOURS;
use weathertool::{
    GetWeatherTool, LocationWeatherResolver, WeatherSummary, WeatherToolConfig, telemetry,
};

#[derive(Debug, Parser)]
#[command(name = "weathertool")]
#[command(about = "Current weather and forecast for a free-text location")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the condensed summary instead of the raw forecast
    #[arg(long)]
    summary: bool,

    /// Print the tool definition and exit
    #[arg(long)]
    definition: bool,

    /// Location to look up, e.g. "Dhaka" or "New York, US"
    location: Vec<String>,
}

impl Cli {
    fn location(&self) -> Option<String> {
        (!self.location.is_empty()).then(|| self.location.join(" "))
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.definition {
        println!(
            "{}",
            serde_json::to_string_pretty(&GetWeatherTool::definition())?
        );
        return Ok(());
    }

    let location = cli.location().context("a location is required")?;

    let config = WeatherToolConfig::load_from_path(cli.config)?;
    telemetry::init_logging(&config.logging)?;

    let tool = GetWeatherTool::new(LocationWeatherResolver::from_config(&config)?);
    let output = tool.get_weather(&location).await?;

    if cli.summary {
        let summary = WeatherSummary::from_output(&output, DEFAULT_UPCOMING_HOURS)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_location_words_are_joined() {
        let cli = Cli::try_parse_from(["weathertool", "--summary", "New", "York,", "US"]).unwrap();
        assert!(cli.summary);
        assert_eq!(cli.location().as_deref(), Some("New York, US"));
    }

    #[test]
    fn test_flags_may_follow_the_location() {
        let cli = Cli::try_parse_from(["weathertool", "Dhaka", "--summary"]).unwrap();
        assert!(cli.summary);
        assert_eq!(cli.location().as_deref(), Some("Dhaka"));
    }

    #[test]
    fn test_location_after_separator_may_look_like_a_flag() {
        let cli = Cli::try_parse_from(["weathertool", "--", "--Dhaka"]).unwrap();
        assert_eq!(cli.location().as_deref(), Some("--Dhaka"));
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Cli::try_parse_from(["weathertool", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_definition_needs_no_location() {
        let cli = Cli::try_parse_from(["weathertool", "--definition"]).unwrap();
        assert!(cli.definition);
        assert_eq!(cli.location(), None);
    }
}
