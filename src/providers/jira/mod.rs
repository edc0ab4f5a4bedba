//! Tickets from one or more Jira Cloud instances, queried over HTTP with basic authentication.

pub mod client;
pub mod config;
pub mod jql;
pub mod schema;

use std::collections::HashSet;

use async_trait::async_trait;
use client::JiraClient;
use config::{missing_configuration_message, AtlassianInstance};
use futures::future::join_all;
use jql::activity_jql;
use schema::JiraIssue;
use tracing::{error, info, instrument, warn};

use crate::{
    activity::{ActivityItem, ActivityProvider},
    error::ActivityError,
    utils::date::ActivityDate,
};

pub const JIRA_SOURCE: &str = "Jira";

fn issue_item(issue: JiraIssue) -> ActivityItem {
    ActivityItem::new(
        format!("{}: {}", issue.key, issue.fields.summary),
        JIRA_SOURCE,
    )
    .with_metadata("key", issue.key)
    .with_metadata("status", issue.fields.status.name)
    .with_metadata("project", issue.fields.project.name)
}

pub struct JiraProvider {
    client: JiraClient,
    instances: Vec<AtlassianInstance>,
    dedupe_by_key: bool,
}

impl JiraProvider {
    pub fn new(client: JiraClient, instances: Vec<AtlassianInstance>) -> Self {
        Self {
            client,
            instances,
            dedupe_by_key: false,
        }
    }

    /// Keep only the first issue seen for every key, across all instances.
    pub fn dedupe_by_key(self, dedupe_by_key: bool) -> Self {
        Self {
            dedupe_by_key,
            ..self
        }
    }
}

#[async_trait]
impl ActivityProvider for JiraProvider {
    fn name(&self) -> &'static str {
        JIRA_SOURCE
    }

    /// Queries every instance at the same time. An instance that fails is logged and contributes
    /// nothing, the others are unaffected. Having no instance at all is an error.
    #[instrument(skip(self))]
    async fn fetch_activity(&self, date: &ActivityDate) -> Result<Vec<ActivityItem>, ActivityError> {
        if self.instances.is_empty() {
            return Err(ActivityError::Configuration(missing_configuration_message()));
        }

        let next = date.next_day()?;
        let jql = activity_jql(date, &next);

        let results = join_all(
            self.instances
                .iter()
                .map(|instance| self.client.search_issues(instance, &jql)),
        )
        .await;

        let mut issues = vec![];
        for (instance, result) in self.instances.iter().zip(results) {
            match result {
                Ok(found) => {
                    info!("Found {} issues on {}", found.len(), instance.domain);
                    issues.extend(found);
                }
                Err(e @ ActivityError::Http { .. }) => {
                    error!("Error fetching from {}: {e}", instance.domain)
                }
                Err(e) => warn!("Skipping {}: {e}", instance.domain),
            }
        }

        if self.dedupe_by_key {
            let mut seen = HashSet::new();
            issues.retain(|issue| seen.insert(issue.key.clone()));
        }

        Ok(issues.into_iter().map(issue_item).collect())
    }
}
