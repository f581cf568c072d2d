use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Products due within this many days are listed as notifications.
pub const NOTIFY_WITHIN_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: String,
    pub name: String,
    pub next_reorder_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderNotification {
    pub id: String,
    pub product_name: String,
    pub days_left: i64,
}

impl ReorderNotification {
    pub fn describe(&self) -> String {
        let plural = |n: i64| if n == 1 { "" } else { "s" };
        if self.days_left <= 0 {
            let overdue = self.days_left.abs();
            format!("Overdue by {} day{}", overdue, plural(overdue))
        } else {
            format!(
                "Reorder due in {} day{}",
                self.days_left,
                plural(self.days_left)
            )
        }
    }
}

/// Whole days until `next_reorder_at`, rounded up. Negative once overdue.
pub fn days_until_reorder(next_reorder_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (next_reorder_at - now).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Items due within [`NOTIFY_WITHIN_DAYS`], in input order.
pub fn reorder_notifications(items: &[ReorderItem], now: DateTime<Utc>) -> Vec<ReorderNotification> {
    items
        .iter()
        .filter_map(|item| {
            let days_left = days_until_reorder(item.next_reorder_at, now);
            (days_left <= NOTIFY_WITHIN_DAYS).then(|| ReorderNotification {
                id: item.id.clone(),
                product_name: item.name.clone(),
                days_left,
            })
        })
        .collect()
}
