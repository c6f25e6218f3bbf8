mod cmd;
mod util;

use std::process::ExitCode;

use argp::FromArgs;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Diagnose failing GitHub Actions workflows.
struct TopLevel {
    #[argp(subcommand)]
    command: SubCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argp(subcommand)]
enum SubCommand {
    Check(cmd::check::Args),
    Scan(cmd::scan::Args),
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_filter(env_filter))
        .init();

    let args: TopLevel = argp::parse_args_or_exit(argp::DEFAULT);
    let result = match args.command {
        SubCommand::Check(args) => cmd::check::run(args).await,
        SubCommand::Scan(args) => cmd::scan::run(args).await,
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}
