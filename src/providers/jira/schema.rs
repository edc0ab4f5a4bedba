//! Shape of `/rest/api/3/search/jql` responses, limited to the requested fields.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JiraSearchResponse {
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
    pub summary: String,
    pub status: JiraStatus,
    pub project: JiraProject,
}

#[derive(Debug, Deserialize)]
pub struct JiraStatus {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JiraProject {
    pub name: String,
    // Only checked for presence, the report shows the project name.
    #[allow(dead_code)]
    pub key: String,
}
