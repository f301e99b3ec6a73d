use log::info;
use rusqlite::{params, Connection, Row};
use thiserror::Error;

use crate::config::IN_MEMORY_DB;
use crate::models::review::{Review, ReviewFilter, Sentiment};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid sentiment stored in reviews table: {0}")]
    InvalidSentiment(String),

    #[error("Review store lock poisoned")]
    LockPoisoned,
}

const SELECT_REVIEWS: &str = "SELECT destination, district, sentiment, cleaned_review, latitude, longitude
     FROM reviews";

/// Relational cache of the cleaned review table. Rebuilt from scratch at every start.
pub struct ReviewStore {
    conn: Connection,
}

impl ReviewStore {
    /// Opens the cache at `db_path`; `:memory:` keeps it in process.
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let conn = if db_path == IN_MEMORY_DB {
            Connection::open_in_memory()?
        } else {
            Connection::open(db_path)?
        };
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drops whatever the previous run left behind and repopulates the table.
    pub fn rebuild(&mut self, reviews: &[Review]) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "DROP TABLE IF EXISTS reviews;
             CREATE TABLE reviews (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 destination TEXT NOT NULL,
                 district TEXT NOT NULL,
                 sentiment TEXT NOT NULL,
                 cleaned_review TEXT NOT NULL,
                 latitude REAL,
                 longitude REAL
             );",
        )?;

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO reviews (destination, district, sentiment, cleaned_review, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for review in reviews {
                stmt.execute(params![
                    review.destination,
                    review.district,
                    review.sentiment.as_str(),
                    review.cleaned_review,
                    review.latitude,
                    review.longitude,
                ])?;
            }
        }
        tx.commit()?;

        info!("Rebuilt reviews cache with {} rows", reviews.len());
        Ok(())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Reviews in load order, narrowed by sentiment or else by district.
    pub fn query(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError> {
        let (sql, arg) = match (&filter.sentiment, &filter.district) {
            (Some(sentiment), _) => (
                format!("{SELECT_REVIEWS} WHERE sentiment = ?1 ORDER BY id"),
                Some(sentiment.as_str().to_string()),
            ),
            (None, Some(district)) => (
                format!("{SELECT_REVIEWS} WHERE district = ?1 ORDER BY id"),
                Some(district.clone()),
            ),
            (None, None) => (format!("{SELECT_REVIEWS} ORDER BY id"), None),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = match arg {
            Some(arg) => stmt.query_map([arg], read_row)?.collect::<Result<Vec<_>, _>>()?,
            None => stmt.query_map([], read_row)?.collect::<Result<Vec<_>, _>>()?,
        };

        rows.into_iter().map(into_review).collect()
    }

    pub fn districts(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT district FROM reviews ORDER BY district")?;
        let districts = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(districts)
    }
}

type RawReview = (String, String, String, String, Option<f64>, Option<f64>);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawReview> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_review(raw: RawReview) -> Result<Review, StoreError> {
    let (destination, district, sentiment, cleaned_review, latitude, longitude) = raw;
    let sentiment = sentiment
        .parse::<Sentiment>()
        .map_err(|e| StoreError::InvalidSentiment(e.0))?;
    Ok(Review {
        destination,
        district,
        sentiment,
        cleaned_review,
        latitude,
        longitude,
    })
}
