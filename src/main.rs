use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use paybot::client::azalea::AzaleaConnector;
use paybot::config::SessionConfig;
use paybot::report::{self, RunReport};
use paybot::runner;

const USAGE: &str = "Usage: paybot <player> <amount> or paybot test";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Either `test [anarchy] [retrySeconds] [maxAttempts]` or
    /// `<player> <amount> [overrides...]` (legacy and positional override
    /// shapes are both accepted)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for the JSON result; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = dispatch(&cli.args).await;
    report.emit();

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn dispatch(args: &[String]) -> RunReport {
    if args.is_empty() {
        return RunReport::usage_error("no_command", USAGE);
    }

    if args[0].eq_ignore_ascii_case("test") {
        let mut config = SessionConfig::load();
        config.apply_test_overrides(&args[1..]);
        return runner::test_connection(&AzaleaConnector, &config).await;
    }

    if args.len() < 2 {
        return RunReport::usage_error("invalid_args", USAGE);
    }

    let player = &args[0];
    let amount = match args[1].parse::<i64>() {
        Ok(amount) if amount > 0 => amount,
        _ => return RunReport::usage_error("invalid_amount", "Invalid amount"),
    };

    let mut config = SessionConfig::load();
    config.apply_transfer_overrides(&args[2..]);
    report::emit_applied_config(&config);

    runner::pay_player(&AzaleaConnector, &config, player, amount).await
}
