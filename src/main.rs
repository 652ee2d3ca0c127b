use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use payroll_engine::config::{DEFAULT_SOURCE_PATH, PayrollConfig};
use payroll_engine::pipeline::{PayrollRun, TracingLogger};
use payroll_engine::report::TextReport;
use payroll_engine::source::open_source;

/// Compute net pay for every employee in a payroll sheet.
#[derive(Debug, Parser)]
#[command(name = "payroll-engine", version, about)]
struct Cli {
    /// Employee sheet (.xlsx or .csv): number, name, birthday (MM-DD-YYYY),
    /// hours, gross salary
    #[arg(default_value = DEFAULT_SOURCE_PATH)]
    source: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = PayrollConfig {
        source_path: cli.source,
        ..PayrollConfig::default()
    };
    debug!(source = %config.source_path.display(), "Payroll engine started");

    let mut source = open_source(&config.source_path);
    let mut sink = TextReport::new(BufWriter::new(io::stdout().lock()));
    let logger = TracingLogger;
    let summary = PayrollRun::new(&config.schedule, &logger).run(source.as_mut(), &mut sink);

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_default_source() {
        let cli = Cli::try_parse_from(["payroll-engine"]).unwrap();
        assert_eq!(cli.source, PathBuf::from(DEFAULT_SOURCE_PATH));
    }

    #[test]
    fn test_positional_source_accepted() {
        let cli = Cli::try_parse_from(["payroll-engine", "march.csv"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("march.csv"));
    }

    #[test]
    fn test_schedule_and_format_flags_rejected() {
        for flag in ["--schedule", "--format", "--audit", "-v"] {
            assert!(
                Cli::try_parse_from(["payroll-engine", flag]).is_err(),
                "{} should not be accepted",
                flag
            );
        }
    }
}
