use crate::utils::date::ActivityDate;

/// Tickets the user was active on during `date`:
/// assigned ones where they changed the status or commented, ones they reported that day, and
/// watched ones that were updated that day. `next` is the day after `date`.
pub fn activity_jql(date: &ActivityDate, next: &ActivityDate) -> String {
    format!(
        "(assignee = currentUser() AND (status changed DURING (\"{date}\") OR commenter = currentUser())) \
         OR (reporter = currentUser() AND created >= \"{date}\" AND created < \"{next}\") \
         OR (watcher = currentUser() AND updated >= \"{date}\" AND updated < \"{next}\")"
    )
}

#[cfg(test)]
mod tests {
    use super::activity_jql;
    use crate::utils::date::ActivityDate;

    #[test]
    fn covers_assigned_reported_and_watched() {
        let date: ActivityDate = "2025-06-30".parse().unwrap();
        let next = date.next_day().unwrap();

        assert_eq!(
            activity_jql(&date, &next),
            "(assignee = currentUser() AND (status changed DURING (\"2025-06-30\") OR commenter = currentUser())) \
             OR (reporter = currentUser() AND created >= \"2025-06-30\" AND created < \"2025-07-01\") \
             OR (watcher = currentUser() AND updated >= \"2025-06-30\" AND updated < \"2025-07-01\")"
        );
    }
}
