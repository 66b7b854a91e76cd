//! Achievement rule registry
//!
//! Every rule is a pure predicate over an immutable [`RuleInput`], keyed by
//! its catalog ID. An evaluation pass skips IDs that are already earned, so
//! re-running a pass with unchanged input never re-fires a rule. `RULES`
//! is kept in catalog order; the "newly earned" list inherits it.

use crate::models::{PortfolioSnapshot, SentimentKind, UserStats};

/// Immutable input for one evaluation pass
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub stats: &'a UserStats,
    /// Local wall-clock hour (0-23) of the tracked event
    pub local_hour: u32,
    /// Present only on portfolio-addition events
    pub portfolio: Option<&'a PortfolioSnapshot>,
    /// Trailing-month benchmark return in percent, when the caller has it
    pub benchmark_return: Option<f64>,
}

/// Which input a rule family scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    /// Evaluated on every tracked event; reads stats and the event clock
    Stat,
    /// Evaluated only when a portfolio snapshot is supplied
    Portfolio,
}

/// One registered rule
pub struct Rule {
    pub id: &'static str,
    pub family: RuleFamily,
    check: fn(&RuleInput) -> bool,
}

impl Rule {
    pub fn is_satisfied(&self, input: &RuleInput) -> bool {
        (self.check)(input)
    }
}

// Stat-threshold rules

fn starter(input: &RuleInput) -> bool {
    input.stats.stocks_favorited > 0
}

fn ai_explorer(input: &RuleInput) -> bool {
    input.stats.ai_screener_uses >= 5
}

fn sentiment_analyst(input: &RuleInput) -> bool {
    input.stats.sentiment_checks >= 10
}

fn portfolio_master(input: &RuleInput) -> bool {
    input.stats.portfolio_additions >= 10
}

fn consecutive_login(input: &RuleInput) -> bool {
    input.stats.consecutive_days >= 3
}

fn night_owl(input: &RuleInput) -> bool {
    input.local_hour >= 22
}

fn early_bird(input: &RuleInput) -> bool {
    input.local_hour < 7
}

fn bull_catcher(input: &RuleInput) -> bool {
    match &input.stats.last_sentiment {
        Some(s) => s.kind == SentimentKind::Bullish && s.score >= 0.8,
        None => false,
    }
}

fn bear_tamer(input: &RuleInput) -> bool {
    match &input.stats.last_sentiment {
        Some(s) => s.kind == SentimentKind::Bearish && s.score <= 0.4,
        None => false,
    }
}

/// Recomputed fresh from the snapshot on every pass; the engine never
/// caches a prior portfolio return.
fn market_crusher(input: &RuleInput) -> bool {
    let (Some(portfolio), Some(benchmark)) = (input.portfolio, input.benchmark_return) else {
        return false;
    };
    match portfolio.return_percent() {
        Some(ret) => ret > benchmark && ret > 0.0,
        None => false,
    }
}

// Portfolio-aggregate rules. A holding missing the field a rule needs is
// non-matching for that rule; it never aborts the pass.

fn diversified(input: &RuleInput) -> bool {
    match input.portfolio {
        Some(portfolio) => portfolio.sectors().len() >= 3,
        None => false,
    }
}

fn is_tech_sector(sector: &str) -> bool {
    matches!(
        sector.to_lowercase().as_str(),
        "technology" | "information technology" | "tech"
    )
}

fn tech_enthusiast(input: &RuleInput) -> bool {
    let Some(portfolio) = input.portfolio else {
        return false;
    };
    let tech = portfolio
        .holdings
        .iter()
        .filter(|h| h.sector.as_deref().is_some_and(|s| is_tech_sector(s.trim())))
        .count();
    tech >= 5
}

fn dividend_hunter(input: &RuleInput) -> bool {
    let Some(portfolio) = input.portfolio else {
        return false;
    };
    let payers = portfolio
        .holdings
        .iter()
        .filter(|h| h.dividend_yield.is_some_and(|y| y > 0.03))
        .count();
    payers >= 3
}

fn value_investor(input: &RuleInput) -> bool {
    let Some(portfolio) = input.portfolio else {
        return false;
    };
    let cheap = portfolio
        .holdings
        .iter()
        .filter(|h| h.pe_ratio.is_some_and(|pe| pe < 15.0))
        .count();
    cheap >= 3
}

fn globetrotter(input: &RuleInput) -> bool {
    let Some(portfolio) = input.portfolio else {
        return false;
    };
    let mut countries: Vec<&str> = Vec::new();
    for holding in &portfolio.holdings {
        if let Some(country) = &holding.country {
            let country = country.trim();
            if !country.is_empty() && !countries.contains(&country) {
                countries.push(country);
            }
        }
    }
    countries.len() >= 3
}

/// All rules, in catalog order
pub const RULES: &[Rule] = &[
    Rule {
        id: "starter",
        family: RuleFamily::Stat,
        check: starter,
    },
    Rule {
        id: "diversified",
        family: RuleFamily::Portfolio,
        check: diversified,
    },
    Rule {
        id: "bull_catcher",
        family: RuleFamily::Stat,
        check: bull_catcher,
    },
    Rule {
        id: "bear_tamer",
        family: RuleFamily::Stat,
        check: bear_tamer,
    },
    Rule {
        id: "dividend_hunter",
        family: RuleFamily::Portfolio,
        check: dividend_hunter,
    },
    Rule {
        id: "tech_enthusiast",
        family: RuleFamily::Portfolio,
        check: tech_enthusiast,
    },
    Rule {
        id: "value_investor",
        family: RuleFamily::Portfolio,
        check: value_investor,
    },
    Rule {
        id: "globetrotter",
        family: RuleFamily::Portfolio,
        check: globetrotter,
    },
    Rule {
        id: "night_owl",
        family: RuleFamily::Stat,
        check: night_owl,
    },
    Rule {
        id: "early_bird",
        family: RuleFamily::Stat,
        check: early_bird,
    },
    Rule {
        id: "ai_explorer",
        family: RuleFamily::Stat,
        check: ai_explorer,
    },
    Rule {
        id: "sentiment_analyst",
        family: RuleFamily::Stat,
        check: sentiment_analyst,
    },
    Rule {
        id: "portfolio_master",
        family: RuleFamily::Stat,
        check: portfolio_master,
    },
    Rule {
        id: "consecutive_login",
        family: RuleFamily::Stat,
        check: consecutive_login,
    },
    Rule {
        id: "market_crusher",
        family: RuleFamily::Stat,
        check: market_crusher,
    },
];

/// Run one evaluation pass and return the newly satisfied achievement IDs
/// in catalog order. Already-earned IDs are never re-evaluated; portfolio
/// rules are skipped when no snapshot is supplied.
pub fn evaluate(input: &RuleInput) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| !(rule.family == RuleFamily::Portfolio && input.portfolio.is_none()))
        .filter(|rule| !input.stats.has_achievement(rule.id))
        .filter(|rule| rule.is_satisfied(input))
        .map(|rule| rule.id)
        .collect()
}
