use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};
use sir::{
    DEFAULT_AXIS_WINDOW, DaySnapshot, ModelInput, Playback, Scenario, SirError, SirModel, Summary,
};
use sir_mrp::Environment;
use sir_mrp::logging::{LevelFilter, init_logging};

const OUTPUT_CSV: &str = "sir_output.csv";
const SUMMARY_JSON: &str = "sir_summary.json";

#[derive(Parser, Debug)]
#[command(version, about = "Simulate an SIR epidemic for a given reproduction number")]
struct Args {
    /// Run document, JSON or TOML. Read as JSON from stdin when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parameter preset, applied before the fields of the run document.
    #[arg(long, value_enum)]
    scenario: Option<Scenario>,

    /// Overrides the number of simulated days.
    #[arg(long)]
    days: Option<usize>,

    #[arg(long, default_value_t = LevelFilter::Info, value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("unknown log level `{level}`"))
}

/// Runs one simulation. Without an output directory only the CSV is written, to `stdout`.
fn run<W: Write>(args: Args, stdout: W) -> Result<(), SirError> {
    let env = Environment::<ModelInput>::load(args.config.as_deref())?;

    let mut input = env.input.clone().unwrap_or_default();
    if args.scenario.is_some() {
        input.scenario = args.scenario;
    }
    if args.days.is_some() {
        input.days = args.days;
    }
    let parameters = input.resolve();
    info!(
        "replicate {} (seed {}): {parameters:?}",
        env.replicate, env.seed
    );
    if !parameters.in_advisory_range() {
        warn!(
            "reproduction number {} is outside the usual range",
            parameters.reproduction_number
        );
    }

    let fingerprint = sir_mrp::fingerprint(&parameters)?;
    let result = SirModel::simulate(&parameters)?;

    let rows: Vec<DaySnapshot> = Playback::new(&result)
        .inspect(|snapshot| {
            if snapshot.day % DEFAULT_AXIS_WINDOW == 0 {
                debug!(
                    "day {}: infected {:.0}, attack rate {:.2}%, axis ceiling {:.0}",
                    snapshot.day,
                    snapshot.infected,
                    snapshot.attack_rate_percent,
                    result.axis_ceiling(snapshot.day, DEFAULT_AXIS_WINDOW)
                );
            }
        })
        .collect();
    env.write_csv_with(OUTPUT_CSV, &rows, stdout)?;

    let summary = Summary::new(&parameters, &result, fingerprint);
    if env.output_dir().is_some() {
        env.write_json(SUMMARY_JSON, &summary)?;
    }
    info!(
        "{:?}: peak infected {:.0} on day {}, final attack rate {:.2}%, digest {}",
        summary.trend,
        summary.peak_infected,
        summary.peak_infected_day,
        summary.final_day.attack_rate_percent,
        summary.result_digest
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "sir",
            "--config",
            "run.toml",
            "--scenario",
            "spreading",
            "--days",
            "90",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("run.toml")));
        assert_eq!(args.scenario, Some(Scenario::Spreading));
        assert_eq!(args.days, Some(90));
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["sir"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.scenario.is_none());
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_bad_log_level() {
        assert!(Args::try_parse_from(["sir", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("run.json");
        let out = dir.path().join("out");
        let document = serde_json::json!({
            "input": {
                "seed": 1,
                "reproduction_number": 2.0,
                "population": 1000,
                "initial_infected": 10,
                "days": 1
            },
            "output": { "spec": "filesystem", "dir": out.to_str().unwrap() }
        });
        std::fs::write(&config, document.to_string()).unwrap();

        let args = Args::try_parse_from(["sir", "--config", config.to_str().unwrap()]).unwrap();
        let mut stdout = Vec::new();
        run(args, &mut stdout).unwrap();
        assert!(stdout.is_empty());

        let csv = std::fs::read_to_string(out.join(OUTPUT_CSV)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "day,susceptible,infected,recovered,cumulative_cases,attack_rate_percent"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,990.0,10.0,0.0,10.0,"));

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join(SUMMARY_JSON)).unwrap())
                .unwrap();
        assert_eq!(summary["trend"], "spreading");
        assert_eq!(summary["parameters"]["days"], 1);
    }

    #[test]
    fn test_run_rejects_invalid_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("run.toml");
        std::fs::write(&config, "[input]\npopulation = 10\ninitial_infected = 20\n").unwrap();

        let args = Args::try_parse_from(["sir", "--config", config.to_str().unwrap()]).unwrap();
        assert!(matches!(
            run(args, io::sink()),
            Err(SirError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_run_to_stdout_writes_only_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("run.toml");
        std::fs::write(
            &config,
            "[input]\nscenario = \"spreading\"\ndays = 3\n\n[output]\nspec = \"stdout\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from(["sir", "--config", config.to_str().unwrap()]).unwrap();
        let mut stdout = Vec::new();
        run(args, &mut stdout).unwrap();

        let text = String::from_utf8(stdout).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "day,susceptible,infected,recovered,cumulative_cases,attack_rate_percent"
        );
        assert!(lines[1].starts_with("0,49995000.0,5000.0,0.0,5000.0,"));
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 6);
        }
        assert!(!text.contains('{'));
        assert!(!dir.path().join(SUMMARY_JSON).exists());
    }
}
