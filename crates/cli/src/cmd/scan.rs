use std::process::ExitCode;

use anyhow::{Context, Result};
use argp::FromArgs;
use runwatch_advisor::FixAdvisor;
use runwatch_logs::{extract_errors, read_archive};
use runwatch_monitor::{annotate_errors, report::render_errors};
use typed_path::Utf8NativePathBuf;

use crate::{cmd::load_config, util::native_path};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Extract and explain the errors in a downloaded log archive.
#[argp(subcommand, name = "scan")]
pub struct Args {
    #[argp(option, short = 'i', from_str_fn(native_path))]
    /// log archive (.zip) to scan
    input: Utf8NativePathBuf,
    #[argp(option, short = 'c', from_str_fn(native_path))]
    /// configuration file (default: config.yml)
    config: Option<Utf8NativePathBuf>,
    #[argp(switch)]
    /// print the errors as JSON
    json: bool,
}

pub async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_ref())?;
    let data = std::fs::read(args.input.with_platform_encoding())
        .with_context(|| format!("Failed to read {}", args.input))?;
    let lines = read_archive(&data).with_context(|| format!("Failed to read {}", args.input))?;
    let occurrences = extract_errors(&lines);
    tracing::info!("Found {} errors in {} log lines", occurrences.len(), lines.len());

    let advisor = FixAdvisor::from_config(&config);
    let errors = annotate_errors(&advisor, occurrences).await;
    if args.json {
        let json = serde_json::to_string_pretty(&errors).context("Failed to serialize errors")?;
        println!("{json}");
    } else {
        let mut out = String::new();
        render_errors(&mut out, &errors);
        print!("{out}");
    }
    Ok(if errors.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
