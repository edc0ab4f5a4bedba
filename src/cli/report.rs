use std::io::{self, Write};

use futures::future::join_all;
use tracing::{debug, error};

use crate::{
    activity::{ActivityItem, ActivityProvider},
    error::ActivityError,
    utils::{collate::CollationKey, date::ActivityDate},
};

/// Stable sort by title, so items with the same title stay in the order providers returned them.
pub fn sort_items(items: &mut [ActivityItem]) {
    items.sort_by_cached_key(|item| CollationKey::new(item.title()));
}

/// Everything found for a single day, already sorted.
#[derive(Debug)]
pub struct Report {
    date: ActivityDate,
    items: Vec<ActivityItem>,
}

async fn fetch(
    provider: &dyn ActivityProvider,
    date: &ActivityDate,
) -> (&'static str, Result<Vec<ActivityItem>, ActivityError>) {
    (provider.name(), provider.fetch_activity(date).await)
}

impl Report {
    /// Runs all `providers` concurrently. A provider that fails is logged and skipped, it never
    /// hides what the others found.
    pub async fn collect(date: ActivityDate, providers: &[Box<dyn ActivityProvider>]) -> Self {
        let results = join_all(
            providers
                .iter()
                .map(|provider| fetch(provider.as_ref(), &date)),
        )
        .await;

        let mut items = vec![];
        for (name, result) in results {
            match result {
                Ok(found) => {
                    debug!("{name} returned {} items", found.len());
                    items.extend(found);
                }
                Err(e) => error!("Error fetching {name} activity: {e}"),
            }
        }
        sort_items(&mut items);

        Self { date, items }
    }

    /// Keeps only items whose title starts with a ticket id.
    pub fn tickets_only(self) -> Self {
        Self {
            items: self
                .items
                .into_iter()
                .filter(|item| item.ticket_id().is_some())
                .collect(),
            ..self
        }
    }

    pub fn items(&self) -> &[ActivityItem] {
        &self.items
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Activity for {}:", self.date)?;
        writeln!(out)?;
        for item in &self.items {
            writeln!(out, "{} | {}", item.title(), item.source())?;
        }
        writeln!(out)?;
        writeln!(out, "Total: {} activities", self.items.len())
    }
}
