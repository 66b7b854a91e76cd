//! Data models for the engagement engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cumulative activity counters and derived engagement state for the single
/// local user. One instance exists per session; the durable copy lives in
/// the stats store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: i64,
    pub stocks_analyzed: i64,
    pub sentiment_checks: i64,
    pub ai_screener_uses: i64,
    pub stocks_favorited: i64,
    pub portfolio_additions: i64,
    pub app_opens: i64,
    pub search_history_count: i64,
    pub consecutive_days: i64,
    pub last_visit_date: NaiveDate,
    /// Sector names from the latest portfolio snapshot, deduplicated in
    /// first-seen order. Rebuilt on every portfolio addition, not
    /// accumulated incrementally.
    pub sectors_in_portfolio: Vec<String>,
    pub highest_sentiment_score: f64,
    pub lowest_sentiment_score: f64,
    /// Most recent sentiment observation, consulted by the sentiment rules.
    pub last_sentiment: Option<SentimentResult>,
    /// Earned achievement IDs, unique, in earn order.
    pub achievements: Vec<String>,
}

impl UserStats {
    /// Zero-valued stats with the visit date seeded to the given day
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_points: 0,
            stocks_analyzed: 0,
            sentiment_checks: 0,
            ai_screener_uses: 0,
            stocks_favorited: 0,
            portfolio_additions: 0,
            app_opens: 0,
            search_history_count: 0,
            consecutive_days: 0,
            last_visit_date: today,
            sectors_in_portfolio: Vec::new(),
            highest_sentiment_score: 0.0,
            lowest_sentiment_score: 0.0,
            last_sentiment: None,
            achievements: Vec::new(),
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|earned| earned == id)
    }
}

/// Direction of a sentiment reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentKind {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentKind::Bullish => "bullish",
            SentimentKind::Neutral => "neutral",
            SentimentKind::Bearish => "bearish",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bullish" => Some(SentimentKind::Bullish),
            "neutral" => Some(SentimentKind::Neutral),
            "bearish" => Some(SentimentKind::Bearish),
            _ => None,
        }
    }
}

/// Sentiment reading for a single security, supplied by the analysis layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub kind: SentimentKind,
    /// Confidence score in [0, 1]
    pub score: f64,
}

/// One portfolio position as seen by the engine. Optional fields carry
/// externally looked-up data that may be unavailable for a given ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub sector: Option<String>,
    /// Dividend yield as a fraction (0.04 = 4%)
    pub dividend_yield: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub country: Option<String>,
    pub shares: Option<f64>,
    pub current_price: Option<f64>,
    pub purchase_price: Option<f64>,
}

/// Caller-supplied point-in-time view of the portfolio. Never cached or
/// owned by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub holdings: Vec<Holding>,
}

impl PortfolioSnapshot {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Distinct sector names in first-seen order. Empty and "Unknown"
    /// sectors are excluded.
    pub fn sectors(&self) -> Vec<String> {
        let mut sectors: Vec<String> = Vec::new();
        for holding in &self.holdings {
            if let Some(sector) = &holding.sector {
                let sector = sector.trim();
                if sector.is_empty() || sector == "Unknown" {
                    continue;
                }
                if !sectors.iter().any(|s| s == sector) {
                    sectors.push(sector.to_string());
                }
            }
        }
        sectors
    }

    /// Overall portfolio return in percent, computed from holdings with
    /// complete share and price data. None when no cost basis is available.
    pub fn return_percent(&self) -> Option<f64> {
        let mut total_value = 0.0;
        let mut total_cost = 0.0;

        for holding in &self.holdings {
            if let (Some(shares), Some(current), Some(purchase)) =
                (holding.shares, holding.current_price, holding.purchase_price)
            {
                total_value += shares * current;
                total_cost += shares * purchase;
            }
        }

        if total_cost == 0.0 {
            return None;
        }
        Some((total_value - total_cost) / total_cost * 100.0)
    }
}

/// Persisted award log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub achievement_id: String,
    pub date_earned: String,
}

/// Single leaderboard row. The deployment is single-user, so the board has
/// exactly one entry until multi-user support lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub username: String,
    pub points: i64,
    pub achievements: i64,
    pub is_current_user: bool,
}
