//! Engagement engine façade
//!
//! `EngagementEngine` owns the durable store and the session cache and is
//! the explicit context for every engine call; there are no process-wide
//! singletons. Each tracking operation increments its counter on the
//! working copy, persists write-through, runs a rule evaluation pass, and
//! applies any new awards before returning the newly earned IDs.

use chrono::{DateTime, Local, Timelike, Utc};
use log::debug;
use std::path::Path;

use crate::db::StatsStore;
use crate::error::Result;
use crate::models::{
    AchievementRecord, LeaderboardEntry, PortfolioSnapshot, SentimentResult, UserStats,
};
use crate::rules::{self, RuleInput};
use crate::score;
use crate::session::SessionCache;
use crate::streak;

pub struct EngagementEngine {
    store: StatsStore,
    cache: SessionCache,
}

impl EngagementEngine {
    /// Open (or create) the engagement store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = StatsStore::open(path)?;
        store.init_schema()?;
        Ok(Self::with_store(store))
    }

    /// Build an engine around an already-initialized store
    pub fn with_store(store: StatsStore) -> Self {
        Self {
            store,
            cache: SessionCache::new(),
        }
    }

    pub fn store(&self) -> &StatsStore {
        &self.store
    }

    /// Record an app visit: advance the visit streak (counting the open on
    /// a new calendar day) and evaluate the stat rules.
    pub fn visit(&mut self) -> Result<Vec<&'static str>> {
        self.visit_at(Local::now())
    }

    pub(crate) fn visit_at(&mut self, now: DateTime<Local>) -> Result<Vec<&'static str>> {
        let today = now.date_naive();
        self.track_event(now, None, None, |stats| {
            let adv = streak::advance(stats.consecutive_days, stats.last_visit_date, today);
            if adv.advanced {
                stats.app_opens += 1;
                debug!("visit streak now {} day(s)", adv.consecutive_days);
            }
            stats.consecutive_days = adv.consecutive_days;
            stats.last_visit_date = adv.last_visit_date;
        })
    }

    /// Record a full stock analysis view
    pub fn track_stock_analysis(&mut self) -> Result<Vec<&'static str>> {
        self.track_stock_analysis_at(Local::now())
    }

    pub(crate) fn track_stock_analysis_at(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<Vec<&'static str>> {
        self.track_event(now, None, None, |stats| stats.stocks_analyzed += 1)
    }

    /// Record a ticker search
    pub fn track_search(&mut self) -> Result<Vec<&'static str>> {
        self.track_search_at(Local::now())
    }

    pub(crate) fn track_search_at(&mut self, now: DateTime<Local>) -> Result<Vec<&'static str>> {
        self.track_event(now, None, None, |stats| stats.search_history_count += 1)
    }

    /// Record a sentiment check, keeping the score bounds and the last
    /// observation the sentiment rules read.
    pub fn track_sentiment_check(&mut self, sentiment: &SentimentResult) -> Result<Vec<&'static str>> {
        self.track_sentiment_check_at(sentiment, Local::now())
    }

    pub(crate) fn track_sentiment_check_at(
        &mut self,
        sentiment: &SentimentResult,
        now: DateTime<Local>,
    ) -> Result<Vec<&'static str>> {
        let observed = sentiment.clone();
        self.track_event(now, None, None, move |stats| {
            stats.sentiment_checks += 1;
            if observed.score > stats.highest_sentiment_score {
                stats.highest_sentiment_score = observed.score;
            }
            if stats.lowest_sentiment_score == 0.0 || observed.score < stats.lowest_sentiment_score
            {
                stats.lowest_sentiment_score = observed.score;
            }
            stats.last_sentiment = Some(observed);
        })
    }

    /// Record a use of the AI screener
    pub fn track_ai_screener_use(&mut self) -> Result<Vec<&'static str>> {
        self.track_ai_screener_use_at(Local::now())
    }

    pub(crate) fn track_ai_screener_use_at(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<Vec<&'static str>> {
        self.track_event(now, None, None, |stats| stats.ai_screener_uses += 1)
    }

    /// Record a stock added to favorites
    pub fn track_favorite_added(&mut self) -> Result<Vec<&'static str>> {
        self.track_favorite_added_at(Local::now())
    }

    pub(crate) fn track_favorite_added_at(
        &mut self,
        now: DateTime<Local>,
    ) -> Result<Vec<&'static str>> {
        self.track_event(now, None, None, |stats| stats.stocks_favorited += 1)
    }

    /// Record a portfolio addition. The snapshot drives the portfolio rule
    /// family and replaces the stored sector set; the benchmark return, when
    /// available, lets `market_crusher` compare performance.
    pub fn track_portfolio_addition(
        &mut self,
        snapshot: &PortfolioSnapshot,
        benchmark_return: Option<f64>,
    ) -> Result<Vec<&'static str>> {
        self.track_portfolio_addition_at(snapshot, benchmark_return, Local::now())
    }

    pub(crate) fn track_portfolio_addition_at(
        &mut self,
        snapshot: &PortfolioSnapshot,
        benchmark_return: Option<f64>,
        now: DateTime<Local>,
    ) -> Result<Vec<&'static str>> {
        let sectors = snapshot.sectors();
        self.track_event(now, Some(snapshot), benchmark_return, move |stats| {
            stats.portfolio_additions += 1;
            stats.sectors_in_portfolio = sectors;
        })
    }

    /// Read-only snapshot of the session stats
    pub fn stats(&mut self) -> Result<UserStats> {
        Ok(self.cache.stats(&self.store)?.clone())
    }

    /// Earned achievements, most recent first
    pub fn achievements(&self) -> Result<Vec<AchievementRecord>> {
        self.store.list_achievements()
    }

    /// Single-entry ranking for the local user; placeholder until
    /// multi-user support exists.
    pub fn leaderboard(&mut self) -> Result<Vec<LeaderboardEntry>> {
        let stats = self.cache.stats(&self.store)?;
        Ok(vec![LeaderboardEntry {
            rank: 1,
            username: "You".to_string(),
            points: stats.total_points,
            achievements: stats.achievements.len() as i64,
            is_current_user: true,
        }])
    }

    /// Shared tracking path: mutate, persist, evaluate, award, persist.
    fn track_event<F>(
        &mut self,
        now: DateTime<Local>,
        portfolio: Option<&PortfolioSnapshot>,
        benchmark_return: Option<f64>,
        mutate: F,
    ) -> Result<Vec<&'static str>>
    where
        F: FnOnce(&mut UserStats),
    {
        let stats = self.cache.stats(&self.store)?;
        mutate(stats);
        self.store.save(stats)?;

        let newly = {
            let input = RuleInput {
                stats: &*stats,
                local_hour: now.hour(),
                portfolio,
                benchmark_return,
            };
            rules::evaluate(&input)
        };

        if !newly.is_empty() {
            score::apply_awards(&self.store, stats, &newly, Utc::now())?;
            self.store.save(stats)?;
        }

        Ok(newly)
    }
}
