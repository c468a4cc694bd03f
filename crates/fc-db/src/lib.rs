//! Storage layer for analyzed matches.
//!
//! Persists one `match` row per analyzed log and one `match_frag` row per
//! frag using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 format with the server offset
//! (e.g., `2019-03-04T20:05:10-05:00`). Frags are never re-sorted by the
//! database; their insertion order is the log order and is kept through the
//! `rowid`.
//!
//! ## Optional Columns
//!
//! `victim_name` and `weapon_code` are NULL for suicides.

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use rusqlite::{Connection, params};
use thiserror::Error;
use uuid::Uuid;

use fc_core::{ReconstructedFrag, SessionMeta};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp could not be parsed back.
    #[error("invalid timestamp in match {match_id}: {timestamp}")]
    TimestampParse {
        match_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A stored match with its frag count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub match_id: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub game_mode: String,
    pub map_name: String,
    pub frag_count: usize,
}

/// A stored frag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragRecord {
    pub frag_time: DateTime<FixedOffset>,
    pub killer_name: String,
    pub victim_name: Option<String>,
    pub weapon_code: Option<String>,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS "match" (
                match_id TEXT PRIMARY KEY,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                game_mode TEXT NOT NULL,
                map_name TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_match_start ON "match"(start_time);

            -- victim_name and weapon_code are NULL for suicides
            CREATE TABLE IF NOT EXISTS match_frag (
                match_id TEXT NOT NULL,
                frag_time TEXT NOT NULL,
                killer_name TEXT NOT NULL,
                victim_name TEXT,
                weapon_code TEXT,
                FOREIGN KEY (match_id) REFERENCES "match"(match_id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_match_frag_match ON match_frag(match_id);
            "#,
        )?;
        Ok(())
    }

    /// Inserts a match and all of its frags in one transaction.
    ///
    /// Returns the generated match ID.
    pub fn insert_match(
        &mut self,
        session: &SessionMeta,
        frags: &[ReconstructedFrag],
    ) -> Result<String, DbError> {
        let match_id = Uuid::new_v4().to_string();
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO "match" (match_id, start_time, end_time, game_mode, map_name)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                match_id,
                format_timestamp(session.start_time),
                format_timestamp(session.end_time),
                session.mode,
                session.map,
            ],
        )?;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO match_frag (match_id, frag_time, killer_name, victim_name, weapon_code)
                VALUES (?, ?, ?, ?, ?)
                ",
            )?;
            for frag in frags {
                stmt.execute(params![
                    match_id,
                    format_timestamp(frag.absolute_time),
                    frag.killer(),
                    frag.victim(),
                    frag.weapon(),
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(%match_id, frags = frags.len(), "inserted match");
        Ok(match_id)
    }

    /// Lists matches ordered by start time then ID.
    pub fn list_matches(&self) -> Result<Vec<MatchRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.match_id, m.start_time, m.end_time, m.game_mode, m.map_name,
                   (SELECT COUNT(*) FROM match_frag f WHERE f.match_id = m.match_id)
            FROM "match" m
            ORDER BY m.start_time ASC, m.match_id ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;
        let mut matches = Vec::new();
        for row in rows {
            let (match_id, start, end, game_mode, map_name, frag_count) = row?;
            matches.push(MatchRecord {
                start_time: parse_timestamp(&match_id, &start)?,
                end_time: parse_timestamp(&match_id, &end)?,
                match_id,
                game_mode,
                map_name,
                frag_count: usize::try_from(frag_count).unwrap_or_default(),
            });
        }
        Ok(matches)
    }

    /// Lists the frags of one match in log order.
    pub fn list_match_frags(&self, match_id: &str) -> Result<Vec<FragRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT frag_time, killer_name, victim_name, weapon_code
            FROM match_frag
            WHERE match_id = ?
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map([match_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;
        let mut frags = Vec::new();
        for row in rows {
            let (frag_time, killer_name, victim_name, weapon_code) = row?;
            frags.push(FragRecord {
                frag_time: parse_timestamp(match_id, &frag_time)?,
                killer_name,
                victim_name,
                weapon_code,
            });
        }
        Ok(frags)
    }

    /// Deletes a match and, through the foreign key, its frags.
    ///
    /// Returns whether a match was removed.
    pub fn delete_match(&mut self, match_id: &str) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute(r#"DELETE FROM "match" WHERE match_id = ?"#, [match_id])?;
        Ok(deleted > 0)
    }
}

fn format_timestamp(time: DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn parse_timestamp(match_id: &str, timestamp: &str) -> Result<DateTime<FixedOffset>, DbError> {
    DateTime::parse_from_rfc3339(timestamp).map_err(|source| DbError::TimestampParse {
        match_id: match_id.to_string(),
        timestamp: timestamp.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use fc_core::{ClockReading, FragEvent};

    fn time(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn session() -> SessionMeta {
        SessionMeta {
            mode: "ASSAULT".into(),
            map: "mp_surf".into(),
            start_time: time("2019-03-04T20:01:12-05:00"),
            end_time: time("2019-03-04T21:03:40-05:00"),
        }
    }

    fn frags() -> Vec<ReconstructedFrag> {
        vec![
            ReconstructedFrag {
                absolute_time: time("2019-03-04T20:58:10-05:00"),
                event: FragEvent::Kill {
                    clock: ClockReading::new(58, 10).unwrap(),
                    line: 4,
                    killer: "A".into(),
                    victim: "B".into(),
                    weapon: "M4".into(),
                },
            },
            ReconstructedFrag {
                absolute_time: time("2019-03-04T21:03:02-05:00"),
                event: FragEvent::Suicide {
                    clock: ClockReading::new(3, 2).unwrap(),
                    line: 5,
                    player: "B".into(),
                },
            },
        ]
    }

    #[test]
    fn insert_and_list_match() {
        let mut db = Database::open_in_memory().unwrap();
        let match_id = db.insert_match(&session(), &frags()).unwrap();

        let matches = db.list_matches().unwrap();
        assert_eq!(
            matches,
            vec![MatchRecord {
                match_id: match_id.clone(),
                start_time: time("2019-03-04T20:01:12-05:00"),
                end_time: time("2019-03-04T21:03:40-05:00"),
                game_mode: "ASSAULT".into(),
                map_name: "mp_surf".into(),
                frag_count: 2,
            }]
        );
    }

    #[test]
    fn frags_round_trip_with_nullable_columns() {
        let mut db = Database::open_in_memory().unwrap();
        let match_id = db.insert_match(&session(), &frags()).unwrap();

        let stored = db.list_match_frags(&match_id).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].killer_name, "A");
        assert_eq!(stored[0].victim_name.as_deref(), Some("B"));
        assert_eq!(stored[0].weapon_code.as_deref(), Some("M4"));
        assert_eq!(stored[1].killer_name, "B");
        assert_eq!(stored[1].victim_name, None);
        assert_eq!(stored[1].weapon_code, None);
        assert_eq!(stored[1].frag_time, time("2019-03-04T21:03:02-05:00"));
    }

    #[test]
    fn timestamps_keep_server_offset() {
        let mut db = Database::open_in_memory().unwrap();
        let match_id = db.insert_match(&session(), &[]).unwrap();
        let stored: String = db
            .conn
            .query_row(
                r#"SELECT start_time FROM "match" WHERE match_id = ?"#,
                [&match_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored, "2019-03-04T20:01:12-05:00");
    }

    #[test]
    fn each_import_gets_a_new_match_id() {
        let mut db = Database::open_in_memory().unwrap();
        let first = db.insert_match(&session(), &frags()).unwrap();
        let second = db.insert_match(&session(), &frags()).unwrap();
        assert_ne!(first, second);
        assert_eq!(db.list_matches().unwrap().len(), 2);
    }

    #[test]
    fn delete_match_cascades_to_frags() {
        let mut db = Database::open_in_memory().unwrap();
        let match_id = db.insert_match(&session(), &frags()).unwrap();

        assert!(db.delete_match(&match_id).unwrap());
        assert!(!db.delete_match(&match_id).unwrap());
        assert!(db.list_matches().unwrap().is_empty());
        assert!(db.list_match_frags(&match_id).unwrap().is_empty());
    }

    #[test]
    fn reopening_on_disk_database_keeps_data() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("farcry.db");
        let match_id = {
            let mut db = Database::open(&path).unwrap();
            db.insert_match(&session(), &frags()).unwrap()
        };
        let db = Database::open(&path).unwrap();
        assert_eq!(db.list_match_frags(&match_id).unwrap().len(), 2);
    }
}
