//! Engagement Scoring & Achievement Engine
//!
//! Tracks cumulative user-activity counters, derives a visit streak from
//! calendar dates, evaluates a fixed catalog of achievement rules against
//! those counters (and caller-supplied portfolio/sentiment snapshots), and
//! awards each achievement at most once while keeping the durable score in
//! sync with the in-session working copy.
//!
//! # Example
//!
//! ```no_run
//! use engagement_engine::EngagementEngine;
//!
//! // Open the engagement store
//! let mut engine = EngagementEngine::open("data/engagement.db").unwrap();
//!
//! // Record an app open; streak math and rule evaluation run inside
//! let unlocked = engine.visit().unwrap();
//!
//! // Track a feature use; returns newly earned achievement IDs
//! let more = engine.track_favorite_added().unwrap();
//! for id in unlocked.iter().chain(&more) {
//!     println!("unlocked: {}", id);
//! }
//!
//! // Read-only views for the presentation layer
//! let stats = engine.stats().unwrap();
//! println!("{} points", stats.total_points);
//! ```

pub mod catalog;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod rules;
pub mod score;
pub mod session;
pub mod streak;

// Re-exports for convenience
pub use catalog::{AchievementDef, CATALOG};
pub use db::StatsStore;
pub use engine::EngagementEngine;
pub use error::{EngineError, Result};
pub use models::{
    AchievementRecord, Holding, LeaderboardEntry, PortfolioSnapshot, SentimentKind,
    SentimentResult, UserStats,
};
pub use rules::{Rule, RuleFamily, RuleInput, RULES};
pub use session::SessionCache;
pub use streak::StreakAdvance;
