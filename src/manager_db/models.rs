use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentSearch {
    pub city: String,
    pub searched_at: DateTime<Utc>,
}
