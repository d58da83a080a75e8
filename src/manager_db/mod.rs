pub mod errors;
pub mod models;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use crate::manager_db::errors::DBError;
use crate::manager_db::models::RecentSearch;

/// Recent city searches, newest first
pub struct DB {
    db_conn: Connection,
    max_entries: usize,
}

impl DB {

    /// Creates a new instance of DB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, or ":memory:"
    /// * 'max_entries' - how many searches to remember
    pub fn new(db_path: &str, max_entries: usize) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
           "CREATE TABLE IF NOT EXISTS recent_search (
                city text not null,
                city_key text not null primary key,
                searched_at integer not null
           )",
           [],
        )?;

        Ok(DB { db_conn, max_entries })
    }

    /// Records a search, moving the city to the front of the list
    ///
    /// Cities are compared case-insensitively, the latest spelling is kept. Entries beyond
    /// the configured maximum are dropped.
    ///
    /// # Arguments
    ///
    /// * 'city' - city as searched for
    pub fn add_recent_search(&self, city: &str) -> Result<(), DBError> {
        self.add_recent_search_at(city, Utc::now())
    }

    fn add_recent_search_at(&self, city: &str, searched_at: DateTime<Utc>) -> Result<(), DBError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(());
        }

        // stamps must be strictly increasing, several searches can land in the same millisecond
        let latest: Option<i64> = self.db_conn.query_row(
            "SELECT MAX(searched_at) FROM recent_search;",
            [],
            |row| row.get(0),
        )?;
        let now = searched_at.timestamp_millis();
        let stamp = match latest {
            Some(l) if l >= now => l + 1,
            _ => now,
        };

        self.db_conn.execute(
            "INSERT INTO recent_search (city, city_key, searched_at) VALUES (?1, ?2, ?3)
                ON CONFLICT(city_key) DO UPDATE SET city = excluded.city, searched_at = excluded.searched_at;",
            params![city, city.to_lowercase(), stamp],
        )?;

        self.db_conn.execute(
            "DELETE FROM recent_search
                WHERE city_key NOT IN (
                    SELECT city_key FROM recent_search ORDER BY searched_at DESC LIMIT ?1
                );",
            params![self.max_entries as i64],
        )?;

        Ok(())
    }

    /// Returns remembered searches, newest first
    ///
    pub fn recent_searches(&self) -> Result<Vec<RecentSearch>, DBError> {
        let mut stmt = self.db_conn.prepare(
            "SELECT city, searched_at
                FROM recent_search
                ORDER BY searched_at DESC
                LIMIT ?1;",
        )?;
        let mut rows = stmt.query(params![self.max_entries as i64])?;

        let mut result: Vec<RecentSearch> = Vec::new();
        while let Some(row) = rows.next()? {
            let city: String = row.get(0)?;
            let millis: i64 = row.get(1)?;
            let searched_at = DateTime::from_timestamp_millis(millis).unwrap_or_default();
            result.push(RecentSearch { city, searched_at });
        }

        Ok(result)
    }

    /// Forgets all searches
    ///
    pub fn clear_recent_searches(&self) -> Result<(), DBError> {
        self.db_conn.execute("DELETE FROM recent_search;", [])?;
        Ok(())
    }
}

#[cfg(test)]
impl DB {
    /// Drops the table so that every later query fails
    pub fn drop_table(&self) {
        self.db_conn.execute("DROP TABLE recent_search;", []).unwrap();
    }
}
