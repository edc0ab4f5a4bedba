//! Commits and pull request reviews, fetched through the GitHub CLI (`gh`), which takes care of
//! authentication.

pub mod runner;
pub mod schema;

use async_trait::async_trait;
use runner::CommandRunner;
use schema::{GhCommit, GhPullRequest};
use tracing::{info, instrument, warn};

use crate::{
    activity::{ActivityItem, ActivityProvider},
    error::ActivityError,
    utils::date::ActivityDate,
};

use super::parse_response;

pub const GITHUB_SOURCE: &str = "GitHub";

const SEARCH_LIMIT: &str = "100";

fn commit_search_args(date: &ActivityDate) -> Vec<String> {
    vec![
        "search".into(),
        "commits".into(),
        "--author=@me".into(),
        format!("--author-date={date}"),
        "--json".into(),
        "commit".into(),
        "--limit".into(),
        SEARCH_LIMIT.into(),
    ]
}

fn review_search_args(date: &ActivityDate) -> Vec<String> {
    vec![
        "search".into(),
        "prs".into(),
        "--reviewed-by=@me".into(),
        format!("--updated={date}"),
        "--json".into(),
        "title".into(),
        "--limit".into(),
        SEARCH_LIMIT.into(),
    ]
}

fn item_with_ticket(title: &str, kind: &str) -> ActivityItem {
    let item = ActivityItem::new(title, GITHUB_SOURCE).with_metadata("type", kind);
    match item.ticket_id().map(str::to_owned) {
        Some(ticket) => item.with_metadata("ticket", ticket),
        None => item,
    }
}

fn commit_item(commit: GhCommit) -> ActivityItem {
    // A trailing `\r` would end up in the report line.
    let first_line = commit.commit.message.lines().next().unwrap_or_default();
    item_with_ticket(first_line, "commit")
}

fn review_item(pr: GhPullRequest) -> ActivityItem {
    item_with_ticket(&pr.title, "pr-review")
}

pub struct GitHubProvider {
    runner: Box<dyn CommandRunner>,
}

impl GitHubProvider {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    #[instrument(skip(self))]
    async fn fetch_commits(&self, date: &ActivityDate) -> Result<Vec<ActivityItem>, ActivityError> {
        let output = self.runner.run(&commit_search_args(date)).await?;
        let commits: Vec<GhCommit> = parse_response("GitHub commit search", &output)?;
        Ok(commits.into_iter().map(commit_item).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_reviews(&self, date: &ActivityDate) -> Result<Vec<ActivityItem>, ActivityError> {
        let output = self.runner.run(&review_search_args(date)).await?;
        let prs: Vec<GhPullRequest> = parse_response("GitHub pull request search", &output)?;
        Ok(prs.into_iter().map(review_item).collect())
    }
}

#[async_trait]
impl ActivityProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        GITHUB_SOURCE
    }

    /// Commits and reviews are fetched independently. If one of them fails it's logged and the
    /// other is still returned.
    async fn fetch_activity(&self, date: &ActivityDate) -> Result<Vec<ActivityItem>, ActivityError> {
        let (commits, reviews) = tokio::join!(self.fetch_commits(date), self.fetch_reviews(date));

        let commits = commits.unwrap_or_else(|e| {
            warn!("Skipping GitHub commits for {date}: {e}");
            vec![]
        });
        let reviews = reviews.unwrap_or_else(|e| {
            warn!("Skipping GitHub reviews for {date}: {e}");
            vec![]
        });
        info!(
            "Found {} commits and {} reviews for {date}",
            commits.len(),
            reviews.len()
        );

        Ok(commits.into_iter().chain(reviews).collect())
    }
}
