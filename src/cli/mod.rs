//! Command-line front end over the forecasting API.

pub mod output;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::api::{forecast_report, ForecastReport, ReportOptions};
use crate::config::{ConfigManager, ForecastConfig};
use crate::errors::{CliError, ForecastError};
use crate::ledger::ForecastInput;
use crate::utils::{build_info, persistence};

pub const USAGE: &str = "\
Usage: cashflow_cli <command> [options]

Commands:
  forecast <input.json>   Project the baseline balance series
  simulate <input.json>   Overlay the input's scenarios on the baseline
  schedule <input.json>   List recurring rules and their dates in the horizon
  config [show|path|init] Inspect or create the configuration file
  version                 Print build information
  help                    Show this message

Options:
  --days <N>              Horizon in days (default from config)
  --today <YYYY-MM-DD>    Reference date (default: local date)
  --json                  Print the report as JSON
  --out <file.json>       Also write the report to a file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub input: PathBuf,
    pub days: Option<u32>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Path,
    Init,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Forecast(RunArgs),
    Simulate(RunArgs),
    Schedule(RunArgs),
    Config(ConfigAction),
    Version,
    Help,
}

fn usage(message: impl Into<String>) -> CliError {
    CliError::Usage(format!("{}\n\n{USAGE}", message.into()))
}

pub fn parse_args<I, S>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "forecast" => Ok(Command::Forecast(parse_run_args(&command, args)?)),
        "simulate" => Ok(Command::Simulate(parse_run_args(&command, args)?)),
        "schedule" => Ok(Command::Schedule(parse_run_args(&command, args)?)),
        "config" => match args.next().as_deref() {
            None | Some("show") => Ok(Command::Config(ConfigAction::Show)),
            Some("path") => Ok(Command::Config(ConfigAction::Path)),
            Some("init") => Ok(Command::Config(ConfigAction::Init)),
            Some(other) => Err(usage(format!("unknown config action `{other}`"))),
        },
        "version" | "--version" => Ok(Command::Version),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(usage(format!("unknown command `{other}`"))),
    }
}

fn parse_run_args(
    command: &str,
    mut args: impl Iterator<Item = String>,
) -> Result<RunArgs, CliError> {
    let mut input = None;
    let mut days = None;
    let mut today = None;
    let mut json = false;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--days" => {
                let value = args.next().ok_or_else(|| usage("--days needs a value"))?;
                let parsed = value
                    .parse::<u32>()
                    .map_err(|_| usage(format!("invalid --days value `{value}`")))?;
                days = Some(parsed);
            }
            "--today" => {
                let value = args.next().ok_or_else(|| usage("--today needs a value"))?;
                let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| usage(format!("invalid --today value `{value}`")))?;
                today = Some(parsed);
            }
            "--out" => {
                let value = args.next().ok_or_else(|| usage("--out needs a path"))?;
                out = Some(PathBuf::from(value));
            }
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(usage(format!("unknown option `{flag}`")));
            }
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => return Err(usage(format!("unexpected argument `{arg}`"))),
        }
    }

    let input = input.ok_or_else(|| usage(format!("`{command}` needs an input file")))?;
    Ok(RunArgs {
        input,
        days,
        today,
        json,
        out,
    })
}

/// Parses `args` (without the program name) and executes the command.
pub fn run_cli<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let command = parse_args(args)?;
    let manager = ConfigManager::new();

    match command {
        Command::Help => println!("{USAGE}"),
        Command::Version => println!("{}", build_info::current().describe()),
        Command::Config(action) => run_config(&manager, action)?,
        Command::Forecast(run) => {
            let config = manager.load()?;
            let input = load_input(&run, false)?;
            let report = build_report(&run, &config, &input)?;
            emit(&run, &report, |report| {
                println!("{}", output::section("Forecast"));
                print!("{}", output::render_series(&report.baseline));
                println!();
                println!("{}", output::section("Summary"));
                print!("{}", output::render_summary(&report.summary));
            })?;
        }
        Command::Simulate(run) => {
            let config = manager.load()?;
            let input = load_input(&run, true)?;
            let report = build_report(&run, &config, &input)?;
            if report.comparison.is_none() {
                return Err(usage(format!(
                    "{} has no scenarios to simulate",
                    run.input.display()
                )));
            }
            emit(&run, &report, |report| {
                println!("{}", output::section("Scenario forecast"));
                print!("{}", output::render_series(report.effective_series()));
                if let Some(comparison) = &report.comparison {
                    println!();
                    println!("{}", output::section("Baseline vs scenario"));
                    print!("{}", output::render_comparison(comparison));
                }
            })?;
        }
        Command::Schedule(run) => {
            let config = manager.load()?;
            let input = load_input(&run, false)?;
            let report = build_report(&run, &config, &input)?;
            emit(&run, &report, |report| {
                println!("{}", output::section("Recurring rules"));
                print!(
                    "{}",
                    output::render_rules(
                        &input.recurring,
                        report.reference_date,
                        config.due_soon_days
                    )
                );
                println!();
                println!(
                    "{}",
                    output::section(&format!("Next {} days", report.horizon_days))
                );
                print!("{}", output::render_schedule(&report.schedule));
            })?;
        }
    }
    Ok(())
}

fn load_input(run: &RunArgs, with_scenarios: bool) -> Result<ForecastInput, CliError> {
    let mut input = persistence::load_input_from_file(&run.input)?;
    if !with_scenarios {
        input.scenarios.clear();
    }
    Ok(input)
}

fn build_report(
    run: &RunArgs,
    config: &ForecastConfig,
    input: &ForecastInput,
) -> Result<ForecastReport, CliError> {
    if !config.color_output || run.json {
        colored::control::set_override(false);
    }

    let mut options = ReportOptions::from(config);
    if let Some(days) = run.days {
        options.horizon_days = days;
    }
    let reference = run.today.unwrap_or_else(|| Local::now().date_naive());
    info!(
        input = %run.input.display(),
        %reference,
        horizon_days = options.horizon_days,
        "building forecast report"
    );
    Ok(forecast_report(input, reference, options)?)
}

fn emit(
    run: &RunArgs,
    report: &ForecastReport,
    render: impl FnOnce(&ForecastReport),
) -> Result<(), CliError> {
    if let Some(path) = &run.out {
        persistence::save_report_to_file(report, path)?;
        info!(path = %path.display(), "wrote report");
    }
    if run.json {
        let json = serde_json::to_string_pretty(report).map_err(ForecastError::from)?;
        println!("{json}");
    } else {
        render(report);
    }
    Ok(())
}

fn run_config(manager: &ConfigManager, action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Path => println!("{}", manager.path().display()),
        ConfigAction::Show => {
            let config = manager.load()?;
            let json =
                serde_json::to_string_pretty(&config).map_err(ForecastError::from)?;
            println!("{json}");
        }
        ConfigAction::Init => {
            if manager.path().exists() {
                println!("Configuration already exists at {}", manager.path().display());
            } else {
                manager.save(&ForecastConfig::default())?;
                println!("Configuration written to {}", manager.path().display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse_args(Vec::<String>::new()).unwrap(), Command::Help);
    }

    #[test]
    fn parses_forecast_options() {
        let command = parse_args([
            "forecast", "data.json", "--days", "14", "--today", "2024-05-01", "--json",
        ])
        .unwrap();
        assert_eq!(
            command,
            Command::Forecast(RunArgs {
                input: PathBuf::from("data.json"),
                days: Some(14),
                today: NaiveDate::from_ymd_opt(2024, 5, 1),
                json: true,
                out: None,
            })
        );
    }

    #[test]
    fn rejects_bad_days() {
        let err = parse_args(["forecast", "data.json", "--days", "-3"]).unwrap_err();
        assert!(err.to_string().contains("invalid --days"));
    }

    #[test]
    fn requires_input_file() {
        let err = parse_args(["simulate"]).unwrap_err();
        assert!(err.to_string().contains("needs an input file"));
    }

    #[test]
    fn config_defaults_to_show() {
        assert_eq!(
            parse_args(["config"]).unwrap(),
            Command::Config(ConfigAction::Show)
        );
        assert!(parse_args(["config", "reset"]).is_err());
    }
}
