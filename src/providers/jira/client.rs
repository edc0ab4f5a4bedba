use std::time::Duration;

use reqwest::{header::ACCEPT, Client};
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::{error::ActivityError, providers::parse_response};

use super::{
    config::AtlassianInstance,
    schema::{JiraIssue, JiraSearchResponse},
};

const SEARCH_FIELDS: &str = "summary,status,project";
const MAX_RESULTS: u32 = 100;

/// Thin wrapper around the Jira Cloud search endpoint. One client is shared by every instance.
pub struct JiraClient {
    http: Client,
    timeout: Duration,
}

impl JiraClient {
    pub fn new(timeout: Duration) -> Result<Self, ActivityError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ActivityError::Transport {
                target: "HTTP client".into(),
                message: e.to_string(),
            })?;
        Ok(Self { http, timeout })
    }

    fn search_url(instance: &AtlassianInstance, jql: &str) -> String {
        format!(
            "{}/rest/api/3/search/jql?jql={}&fields={SEARCH_FIELDS}&maxResults={MAX_RESULTS}",
            instance.base_url(),
            encode(jql)
        )
    }

    fn request_error(&self, instance: &AtlassianInstance, e: reqwest::Error) -> ActivityError {
        if e.is_timeout() {
            ActivityError::Timeout {
                target: instance.domain.clone(),
                timeout: self.timeout,
            }
        } else {
            ActivityError::Transport {
                target: instance.domain.clone(),
                message: e.to_string(),
            }
        }
    }

    /// Runs `jql` against `instance`. Non-success statuses are returned as
    /// [ActivityError::Http] carrying the response body.
    #[instrument(skip(self, jql), fields(domain = %instance.domain))]
    pub async fn search_issues(
        &self,
        instance: &AtlassianInstance,
        jql: &str,
    ) -> Result<Vec<JiraIssue>, ActivityError> {
        let response = self
            .http
            .get(Self::search_url(instance, jql))
            .basic_auth(&instance.email, Some(&instance.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.request_error(instance, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(instance, e))?;

        if !status.is_success() {
            return Err(ActivityError::Http {
                domain: instance.domain.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: JiraSearchResponse =
            parse_response(&format!("Jira instance {}", instance.domain), &body)?;
        debug!("Received {} issues", parsed.issues.len());
        Ok(parsed.issues)
    }
}

#[cfg(test)]
mod tests {
    use super::JiraClient;
    use crate::providers::jira::config::AtlassianInstance;

    #[test]
    fn search_url_encodes_query() {
        let instance = AtlassianInstance::new("acme".into(), "a".into(), "b".into());
        let url = JiraClient::search_url(&instance, "updated >= \"2025-06-01\"");
        assert_eq!(
            url,
            "https://acme.atlassian.net/rest/api/3/search/jql?jql=updated%20%3E%3D%20%222025-06-01%22&fields=summary,status,project&maxResults=100"
        );
    }
}
