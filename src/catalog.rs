//! Static achievement catalog
//!
//! The catalog is process-wide and immutable. `CATALOG` order is the
//! canonical display/iteration order; the rule registry and every
//! "newly earned" list follow it.

/// Catalog entry for one achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub points: i64,
}

pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "starter",
        name: "Portfolio Pioneer",
        description: "Added your first stock to favorites",
        icon: "🏁",
        category: "basics",
        points: 10,
    },
    AchievementDef {
        id: "diversified",
        name: "Sector Strategist",
        description: "Added stocks from at least 3 different sectors",
        icon: "🌈",
        category: "portfolio",
        points: 25,
    },
    AchievementDef {
        id: "bull_catcher",
        name: "Bull Catcher",
        description: "Added a stock with over 80% bullish sentiment",
        icon: "🐂",
        category: "sentiment",
        points: 15,
    },
    AchievementDef {
        id: "bear_tamer",
        name: "Bear Tamer",
        description: "Added a stock with over 60% bearish sentiment",
        icon: "🐻",
        category: "sentiment",
        points: 20,
    },
    AchievementDef {
        id: "dividend_hunter",
        name: "Dividend Hunter",
        description: "Added 3 stocks with dividend yields over 3%",
        icon: "💰",
        category: "income",
        points: 30,
    },
    AchievementDef {
        id: "tech_enthusiast",
        name: "Tech Enthusiast",
        description: "Added 5 technology stocks to your portfolio",
        icon: "💻",
        category: "sectors",
        points: 20,
    },
    AchievementDef {
        id: "value_investor",
        name: "Value Investor",
        description: "Added 3 stocks with P/E ratio below market average",
        icon: "🧮",
        category: "strategy",
        points: 25,
    },
    AchievementDef {
        id: "globetrotter",
        name: "Investment Globetrotter",
        description: "Added stocks from 3 different countries",
        icon: "🌎",
        category: "global",
        points: 30,
    },
    AchievementDef {
        id: "night_owl",
        name: "Night Owl Trader",
        description: "Used the app after 10 PM",
        icon: "🦉",
        category: "usage",
        points: 10,
    },
    AchievementDef {
        id: "early_bird",
        name: "Early Bird Investor",
        description: "Used the app before 7 AM",
        icon: "🐦",
        category: "usage",
        points: 10,
    },
    AchievementDef {
        id: "ai_explorer",
        name: "AI Explorer",
        description: "Used the AI Screener 5 times",
        icon: "🤖",
        category: "tools",
        points: 20,
    },
    AchievementDef {
        id: "sentiment_analyst",
        name: "Sentiment Analyst",
        description: "Checked sentiment for 10 different stocks",
        icon: "📊",
        category: "tools",
        points: 25,
    },
    AchievementDef {
        id: "portfolio_master",
        name: "Portfolio Master",
        description: "Added 10 stocks to your portfolio",
        icon: "🏆",
        category: "portfolio",
        points: 30,
    },
    AchievementDef {
        id: "consecutive_login",
        name: "Market Regular",
        description: "Used the app for 3 consecutive days",
        icon: "📆",
        category: "usage",
        points: 15,
    },
    AchievementDef {
        id: "market_crusher",
        name: "Market Crusher",
        description: "Your portfolio outperformed the S&P 500",
        icon: "💪",
        category: "performance",
        points: 50,
    },
];

/// Look up a catalog entry by achievement ID
pub fn get(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, def) in CATALOG.iter().enumerate() {
            assert!(
                !CATALOG[i + 1..].iter().any(|other| other.id == def.id),
                "duplicate catalog id: {}",
                def.id
            );
        }
    }

    #[test]
    fn test_catalog_points_positive() {
        for def in CATALOG {
            assert!(def.points > 0, "{} has non-positive points", def.id);
        }
    }

    #[test]
    fn test_get_known_and_unknown() {
        let starter = get("starter").unwrap();
        assert_eq!(starter.name, "Portfolio Pioneer");
        assert_eq!(starter.points, 10);
        assert!(get("no_such_badge").is_none());
    }
}
