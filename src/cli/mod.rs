pub mod report;

use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use clap::Parser;
use report::Report;
use tracing::{debug, level_filters::LevelFilter, warn};

use crate::{
    activity::ActivityProvider,
    error::ActivityError,
    providers::{
        github::{runner::GhCli, GitHubProvider},
        jira::{client::JiraClient, config::discover_instances, JiraProvider},
    },
    utils::{
        clock::{Clock, DefaultClock},
        date::ActivityDate,
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "daily-activity", version)]
#[command(about = "Lists your GitHub and Jira activity for a day", long_about = None)]
pub struct Args {
    #[arg(help = "Day to report on, as YYYY-MM-DD. Defaults to today")]
    pub date: Option<String>,
    #[arg(
        long,
        default_value = ".env",
        help = "File with ATLASSIAN_N_* variables. Variables already set in the environment win"
    )]
    pub env_file: PathBuf,
    #[arg(
        long,
        default_value_t = 30,
        help = "Seconds to wait for each Jira request or gh invocation"
    )]
    pub timeout: u64,
    #[arg(long, default_value = "gh", help = "GitHub CLI executable")]
    pub gh: PathBuf,
    #[arg(long, help = "Report a Jira issue only once even if several instances return it")]
    pub dedupe: bool,
    #[arg(long, help = "Only show activity that starts with a ticket id such as PROJ-123")]
    pub tickets_only: bool,
    #[arg(long, help = "Enable verbose logging")]
    pub log: bool,
    #[arg(
        long,
        help = "Also write logs into $XDG_STATE_HOME/daily-activity/logs or $HOME/.local/state/daily-activity/logs"
    )]
    pub log_file: bool,
}

/// Uses the explicit argument when present, today's local date otherwise.
pub fn resolve_date(arg: Option<&str>, clock: &dyn Clock) -> Result<ActivityDate, ActivityError> {
    match arg {
        Some(s) => s.parse(),
        None => Ok(clock.today().into()),
    }
}

fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!("Loaded environment from {path:?}"),
        Err(e) if e.not_found() => debug!("No environment file at {path:?}"),
        Err(e) => warn!("Failed to load {path:?}: {e}"),
    }
}

fn environment() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Registry of providers, in the order their failures are reported.
pub fn create_providers(
    args: &Args,
    vars: &HashMap<String, String>,
) -> Result<Vec<Box<dyn ActivityProvider>>> {
    let timeout = Duration::from_secs(args.timeout);

    let jira = JiraProvider::new(JiraClient::new(timeout)?, discover_instances(vars))
        .dedupe_by_key(args.dedupe);
    let github = GitHubProvider::new(Box::new(GhCli::new(args.gh.clone(), timeout)));

    Ok(vec![Box::new(jira), Box::new(github)])
}

pub async fn run_cli(args: Args) -> Result<()> {
    // Nothing is fetched for a date that doesn't look like one.
    let date = resolve_date(args.date.as_deref(), &DefaultClock)?;

    let log_dir = if args.log_file {
        Some(create_application_default_path()?.join("logs"))
    } else {
        None
    };
    enable_logging(log_dir.as_deref(), args.log.then_some(LevelFilter::TRACE))?;

    load_env_file(&args.env_file);
    let providers = create_providers(&args, &environment())?;

    let mut report = Report::collect(date, &providers).await;
    if args.tickets_only {
        report = report.tickets_only();
    }

    let mut stdout = std::io::stdout().lock();
    report.write_to(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}
