//! Atlassian instances are configured through numbered environment variables:
//! `ATLASSIAN_1_DOMAIN`, `ATLASSIAN_1_ACCOUNT_EMAIL`, `ATLASSIAN_1_API_TOKEN`, then `ATLASSIAN_2_*`
//! and so on. Scanning stops at the first index where none of the three is set.

use std::{collections::HashMap, fmt::Debug};

use tracing::{debug, warn};

pub const ENV_PREFIX: &str = "ATLASSIAN";

#[derive(Clone, PartialEq, Eq)]
pub struct AtlassianInstance {
    pub domain: String,
    pub email: String,
    pub api_token: String,
    base_url: String,
}

impl AtlassianInstance {
    /// Instance hosted at `https://{domain}.atlassian.net`.
    pub fn new(domain: String, email: String, api_token: String) -> Self {
        let base_url = format!("https://{domain}.atlassian.net");
        Self {
            domain,
            email,
            api_token,
            base_url,
        }
    }

    /// Points the instance at a different host, e.g. a proxy or a local test server.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Tokens end up in logs through `instrument` otherwise.
impl Debug for AtlassianInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlassianInstance")
            .field("domain", &self.domain)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Message used when no instance could be found at all.
pub fn missing_configuration_message() -> String {
    format!(
        "At least one Atlassian instance must be configured with {ENV_PREFIX}_N_DOMAIN, \
         {ENV_PREFIX}_N_ACCOUNT_EMAIL and {ENV_PREFIX}_N_API_TOKEN in .env"
    )
}

/// Extracts instances from `vars` in index order. Empty values count as missing. An index with
/// only some of its variables set is skipped with a warning, and scanning moves on to the next
/// one.
pub fn discover_instances(vars: &HashMap<String, String>) -> Vec<AtlassianInstance> {
    let lookup = |index: usize, name: &str| {
        vars.get(&format!("{ENV_PREFIX}_{index}_{name}"))
            .filter(|v| !v.is_empty())
            .cloned()
    };

    let mut instances = vec![];
    for index in 1.. {
        match (
            lookup(index, "DOMAIN"),
            lookup(index, "ACCOUNT_EMAIL"),
            lookup(index, "API_TOKEN"),
        ) {
            (Some(domain), Some(email), Some(api_token)) => {
                debug!("Found Atlassian instance {domain} at index {index}");
                instances.push(AtlassianInstance::new(domain, email, api_token));
            }
            (None, None, None) => break,
            _ => warn!("Incomplete configuration for {ENV_PREFIX}_{index}_*. Skipping."),
        }
    }
    instances
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{discover_instances, AtlassianInstance};
    use crate::utils::logging::TEST_LOGGING;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full(index: usize, domain: &str) -> Vec<(String, String)> {
        vec![
            (format!("ATLASSIAN_{index}_DOMAIN"), domain.to_owned()),
            (
                format!("ATLASSIAN_{index}_ACCOUNT_EMAIL"),
                format!("me@{domain}.com"),
            ),
            (format!("ATLASSIAN_{index}_API_TOKEN"), format!("{domain}-token")),
        ]
    }

    #[test]
    fn finds_consecutive_instances_in_order() {
        *TEST_LOGGING;
        let env = full(1, "first")
            .into_iter()
            .chain(full(2, "second"))
            .chain(full(4, "unreachable"))
            .collect::<HashMap<_, _>>();

        let instances = discover_instances(&env);

        assert_eq!(
            instances,
            vec![
                AtlassianInstance::new("first".into(), "me@first.com".into(), "first-token".into()),
                AtlassianInstance::new(
                    "second".into(),
                    "me@second.com".into(),
                    "second-token".into()
                ),
            ]
        );
    }

    #[test]
    fn incomplete_index_is_skipped_but_scanning_continues() {
        *TEST_LOGGING;
        let mut env = vars(&[
            ("ATLASSIAN_1_DOMAIN", "partial"),
            ("ATLASSIAN_1_ACCOUNT_EMAIL", "me@partial.com"),
        ]);
        env.extend(full(2, "second"));

        let instances = discover_instances(&env);

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].domain, "second");
    }

    #[test]
    fn empty_values_count_as_missing() {
        *TEST_LOGGING;
        let env = vars(&[
            ("ATLASSIAN_1_DOMAIN", ""),
            ("ATLASSIAN_1_ACCOUNT_EMAIL", ""),
            ("ATLASSIAN_1_API_TOKEN", ""),
        ]);

        assert!(discover_instances(&env).is_empty());
    }

    #[test]
    fn nothing_configured_yields_nothing() {
        *TEST_LOGGING;
        assert!(discover_instances(&vars(&[("HOME", "/root")])).is_empty());
    }

    #[test]
    fn default_base_url_uses_atlassian_cloud() {
        let instance = AtlassianInstance::new("acme".into(), "a".into(), "b".into());
        assert_eq!(instance.base_url(), "https://acme.atlassian.net");
        let instance = instance.with_base_url("http://127.0.0.1:1234/");
        assert_eq!(instance.base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn debug_output_hides_token() {
        let instance = AtlassianInstance::new("acme".into(), "a".into(), "secret".into());
        assert!(!format!("{instance:?}").contains("secret"));
    }
}
