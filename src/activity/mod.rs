//! The record every provider produces and the contract providers implement.

use std::{collections::BTreeMap, sync::LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::{error::ActivityError, utils::date::ActivityDate};

/// Provider defined details attached to an item. Only informational, nothing downstream reads it.
pub type Metadata = BTreeMap<String, Value>;

static TICKET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+-[0-9]+)").expect("Ticket pattern is valid"));

/// Returns the ticket id a title starts with, e.g. `PROJ-42` in `PROJ-42: Fix login`.
pub fn ticket_id(title: &str) -> Option<&str> {
    TICKET_ID
        .captures(title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// One reportable unit of work: a commit, a reviewed pull request or a touched ticket.
/// Fields are private so an item can't change once a provider has built it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    title: String,
    source: &'static str,
    metadata: Metadata,
}

impl ActivityItem {
    pub fn new(title: impl Into<String>, source: &'static str) -> Self {
        debug_assert!(!source.is_empty(), "Activity source can't be empty");
        Self {
            title: title.into(),
            source,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_owned(), value.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn ticket_id(&self) -> Option<&str> {
        ticket_id(&self.title)
    }
}

/// A backend that knows how to list a user's activity for one day. New backends are added by
/// implementing this and registering them in [crate::cli], never by branching on the source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Display name, also used as [ActivityItem::source].
    fn name(&self) -> &'static str;

    async fn fetch_activity(&self, date: &ActivityDate) -> Result<Vec<ActivityItem>, ActivityError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ticket_id, ActivityItem};

    #[test]
    fn ticket_id_only_matches_prefix() {
        assert_eq!(ticket_id("PROJ-42: Fix login"), Some("PROJ-42"));
        assert_eq!(ticket_id("ABC-1 tweak"), Some("ABC-1"));
        assert_eq!(ticket_id("Fix PROJ-42"), None);
        assert_eq!(ticket_id("proj-42: lowercase"), None);
        assert_eq!(ticket_id(""), None);
    }

    #[test]
    fn item_keeps_metadata_in_key_order() {
        let item = ActivityItem::new("OPS-7: Rotate keys", "Jira")
            .with_metadata("status", "Done")
            .with_metadata("key", "OPS-7");
        assert_eq!(item.title(), "OPS-7: Rotate keys");
        assert_eq!(item.source(), "Jira");
        assert_eq!(item.ticket_id(), Some("OPS-7"));
        assert_eq!(
            serde_json::to_value(item.metadata()).unwrap(),
            json!({"key": "OPS-7", "status": "Done"})
        );
    }
}
