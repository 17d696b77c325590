//! Monolink CLI - bundle a Lua/Luau module tree into one file
//!
//! Usage: monolink [--json] [-v]
//!
//! Reads `bundle.toml` from the current directory, builds the combined unit
//! and writes it atomically. Flags only affect reporting, never the output.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::warn;

use monolink::config::{self, BundleConfig};
use monolink::presentation::{self, OutputFormat};
use monolink::{BuildUseCase, BundleError, LocalFs};

/// Monolink - single-file bundler for Lua/Luau module trees
#[derive(Parser, Debug)]
#[command(name = "monolink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the build report as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match run(format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err, format);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("MONOLINK_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn run(format: OutputFormat) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = config::discover(&cwd)?;
    let (config, warnings) = BundleConfig::load_with_warnings(&manifest)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let base_dir = manifest.parent().unwrap_or(Path::new("."));
    let result =
        BuildUseCase::new(LocalFs::new()).execute(base_dir, &config, Local::now().date_naive())?;

    match format {
        OutputFormat::Json => {
            let value = presentation::report_json(&result, &warnings);
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            let unicode = std::io::stdout().is_terminal();
            print!("{}", presentation::render_report(&result, &warnings, unicode));
        }
    }
    Ok(())
}

fn report_failure(err: &anyhow::Error, format: OutputFormat) {
    match (err.downcast_ref::<BundleError>(), format) {
        (Some(bundle_err), OutputFormat::Json) => {
            println!("{}", presentation::error_json(bundle_err));
        }
        (Some(bundle_err), OutputFormat::Text) => {
            let unicode = std::io::stderr().is_terminal();
            eprintln!("{}", presentation::render_error(bundle_err, unicode));
        }
        (None, OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::json!({ "success": false, "error": format!("{err:#}") })
            );
        }
        (None, OutputFormat::Text) => eprintln!("Error: {err:#}"),
    }
}
