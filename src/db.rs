//! SQLite persistence for engagement state
//!
//! One stats record, one append-only award log, keyed by a fixed singleton
//! row id. All writes are immediately visible to subsequent reads on the
//! same connection; there is no locking, as the deployment has a single
//! writer per store.

use chrono::{DateTime, Local, Utc};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;

use crate::error::Result;
use crate::models::{AchievementRecord, SentimentKind, SentimentResult, UserStats};

/// The store holds exactly one user; every stats access goes through this id.
const STATS_ROW_ID: i64 = 1;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Durable store for the engagement stats record and award log
pub struct StatsStore {
    conn: Connection,
}

impl StatsStore {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Initialize the store schema
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        info!("engagement schema initialized");
        Ok(())
    }

    /// Load the stats record merged with the earned-achievement list.
    ///
    /// The first ever load seeds and returns a zero-valued record with
    /// `last_visit_date` set to today.
    pub fn load(&self) -> Result<UserStats> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT total_points, stocks_analyzed, sentiment_checks, ai_screener_uses,
                   stocks_favorited, portfolio_additions, app_opens, search_history_count,
                   consecutive_days, last_visit_date, highest_sentiment_score,
                   lowest_sentiment_score, last_sentiment_kind, last_sentiment_score
            FROM user_stats
            WHERE id = ?1
            "#,
        )?;

        let base = stmt
            .query_row(params![STATS_ROW_ID], |row| {
                let kind: Option<String> = row.get(12)?;
                let score: Option<f64> = row.get(13)?;
                Ok(UserStats {
                    total_points: row.get(0)?,
                    stocks_analyzed: row.get(1)?,
                    sentiment_checks: row.get(2)?,
                    ai_screener_uses: row.get(3)?,
                    stocks_favorited: row.get(4)?,
                    portfolio_additions: row.get(5)?,
                    app_opens: row.get(6)?,
                    search_history_count: row.get(7)?,
                    consecutive_days: row.get(8)?,
                    last_visit_date: row.get(9)?,
                    sectors_in_portfolio: Vec::new(),
                    highest_sentiment_score: row.get(10)?,
                    lowest_sentiment_score: row.get(11)?,
                    last_sentiment: match (kind, score) {
                        (Some(kind), Some(score)) => SentimentKind::parse(&kind)
                            .map(|kind| SentimentResult { kind, score }),
                        _ => None,
                    },
                    achievements: Vec::new(),
                })
            })
            .optional()?;

        let mut stats = match base {
            Some(stats) => stats,
            None => {
                let stats = UserStats::new(Local::now().date_naive());
                self.save(&stats)?;
                debug!("seeded default user stats record");
                return Ok(stats);
            }
        };

        stats.sectors_in_portfolio = self
            .conn
            .prepare("SELECT sector FROM portfolio_sectors ORDER BY position ASC")?
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;

        // Earn order is insertion order in the award log
        stats.achievements = self
            .conn
            .prepare("SELECT achievement_id FROM achievements ORDER BY id ASC")?
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(stats)
    }

    /// Write-through of the stats record and sector set. Achievement rows
    /// are written only via `append_achievement`.
    pub fn save(&self, stats: &UserStats) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT OR REPLACE INTO user_stats
            (id, total_points, stocks_analyzed, sentiment_checks, ai_screener_uses,
             stocks_favorited, portfolio_additions, app_opens, search_history_count,
             consecutive_days, last_visit_date, highest_sentiment_score,
             lowest_sentiment_score, last_sentiment_kind, last_sentiment_score)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                STATS_ROW_ID,
                stats.total_points,
                stats.stocks_analyzed,
                stats.sentiment_checks,
                stats.ai_screener_uses,
                stats.stocks_favorited,
                stats.portfolio_additions,
                stats.app_opens,
                stats.search_history_count,
                stats.consecutive_days,
                stats.last_visit_date,
                stats.highest_sentiment_score,
                stats.lowest_sentiment_score,
                stats.last_sentiment.as_ref().map(|s| s.kind.as_str()),
                stats.last_sentiment.as_ref().map(|s| s.score),
            ],
        )?;

        tx.execute("DELETE FROM portfolio_sectors", [])?;
        for (position, sector) in stats.sectors_in_portfolio.iter().enumerate() {
            tx.execute(
                "INSERT INTO portfolio_sectors (position, sector) VALUES (?1, ?2)",
                params![position as i64, sector],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Record an award. A duplicate append is a successful no-op; this is
    /// the durable half of the at-most-once guarantee.
    pub fn append_achievement(&self, id: &str, earned_at: DateTime<Utc>) -> Result<()> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO achievements (achievement_id, date_earned) VALUES (?1, ?2)",
            params![id, earned_at.format(TIMESTAMP_FORMAT).to_string()],
        )?;
        if inserted == 0 {
            debug!("achievement {} already recorded", id);
        }
        Ok(())
    }

    /// All earned achievements, most recent first
    pub fn list_achievements(&self) -> Result<Vec<AchievementRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT achievement_id, date_earned
            FROM achievements
            ORDER BY date_earned DESC, id DESC
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(AchievementRecord {
                    achievement_id: row.get(0)?,
                    date_earned: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// Wipe all engagement state. Not exposed on the engine façade; the
    /// next `load` seeds a fresh zero record.
    pub fn reset(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM achievements", [])?;
        tx.execute("DELETE FROM portfolio_sectors", [])?;
        tx.execute("DELETE FROM user_stats", [])?;
        tx.commit()?;
        info!("engagement store reset");
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
-- Singleton user statistics record
CREATE TABLE IF NOT EXISTS user_stats (
    id INTEGER PRIMARY KEY,
    total_points INTEGER NOT NULL DEFAULT 0,
    stocks_analyzed INTEGER NOT NULL DEFAULT 0,
    sentiment_checks INTEGER NOT NULL DEFAULT 0,
    ai_screener_uses INTEGER NOT NULL DEFAULT 0,
    stocks_favorited INTEGER NOT NULL DEFAULT 0,
    portfolio_additions INTEGER NOT NULL DEFAULT 0,
    app_opens INTEGER NOT NULL DEFAULT 0,
    search_history_count INTEGER NOT NULL DEFAULT 0,
    consecutive_days INTEGER NOT NULL DEFAULT 0,
    last_visit_date TEXT NOT NULL,
    highest_sentiment_score REAL NOT NULL DEFAULT 0,
    lowest_sentiment_score REAL NOT NULL DEFAULT 0,
    last_sentiment_kind TEXT,
    last_sentiment_score REAL,
    date_updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Sectors currently represented in the portfolio, as an ordered set
CREATE TABLE IF NOT EXISTS portfolio_sectors (
    position INTEGER PRIMARY KEY,
    sector TEXT NOT NULL UNIQUE
);

-- Append-only award log; achievement_id uniqueness enforces at-most-once
CREATE TABLE IF NOT EXISTS achievements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    achievement_id TEXT NOT NULL UNIQUE,
    date_earned TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_achievements_date ON achievements(date_earned);
"#;
