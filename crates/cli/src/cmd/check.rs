use std::process::ExitCode;

use anyhow::{Context, Result};
use argp::FromArgs;
use runwatch_advisor::FixAdvisor;
use runwatch_core::{
    config::MonitorConfig,
    models::{MonitorTarget, Repository},
};
use runwatch_github::GitHub;
use runwatch_monitor::{
    Monitor,
    report::{render_json, render_text},
};
use typed_path::Utf8NativePathBuf;

use crate::{
    cmd::load_config,
    util::{native_path, repository},
};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Check the latest run of every workflow and explain the failures.
#[argp(subcommand, name = "check")]
pub struct Args {
    #[argp(option, short = 'c', from_str_fn(native_path))]
    /// configuration file (default: config.yml)
    config: Option<Utf8NativePathBuf>,
    #[argp(option, short = 'r', from_str_fn(repository))]
    /// repository to check, as owner/name or a GitHub URL
    repo: Option<Repository>,
    #[argp(option, short = 'b')]
    /// branch whose runs are checked
    branch: Option<String>,
    #[argp(switch)]
    /// print the summary as JSON
    json: bool,
}

/// Applies `--repo` and `--branch` on top of the configured target.
fn resolve_target(
    config: &MonitorConfig,
    repo: Option<Repository>,
    branch: Option<String>,
) -> Result<MonitorTarget> {
    let mut config = config.clone();
    if let Some(repo) = repo {
        config.owner = repo.owner;
        config.repo = repo.name;
    }
    if let Some(branch) = branch {
        config.branch = branch;
    }
    config.target()
}

pub async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_ref())?;
    let target = resolve_target(&config.monitor, args.repo, args.branch)?;

    let github = GitHub::new(&config.github).await.context("Failed to create GitHub client")?;
    let advisor = FixAdvisor::from_config(&config);
    let monitor = Monitor::new(target, github, advisor);
    let summary = monitor.run_pass().await;

    if args.json {
        println!("{}", render_json(&summary)?);
    } else {
        print!("{}", render_text(&summary));
    }
    Ok(if summary.failed_count > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
