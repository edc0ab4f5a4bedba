//! Concrete [ActivityProvider](crate::activity::ActivityProvider) implementations and the
//! boundary check every backend response goes through.

pub mod github;
pub mod jira;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ActivityError;

/// Parses a raw backend response into `T`. The body has to be valid JSON and match `T`
/// completely, otherwise nothing from it is used.
pub fn parse_response<T: DeserializeOwned>(context: &str, body: &str) -> Result<T, ActivityError> {
    let value = serde_json::from_str::<Value>(body).map_err(|e| ActivityError::Validation {
        context: context.to_owned(),
        message: format!("malformed JSON: {e}"),
    })?;
    serde_json::from_value(value).map_err(|e| ActivityError::Validation {
        context: context.to_owned(),
        message: format!("unexpected shape: {e}"),
    })
}
