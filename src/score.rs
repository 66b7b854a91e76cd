//! Score aggregation
//!
//! Applies a pass's newly earned IDs to the working copy and the durable
//! award log. `total_points` is only ever changed here, so it always equals
//! the catalog-point sum over the earned set.

use chrono::{DateTime, Utc};
use log::info;

use crate::catalog;
use crate::db::StatsStore;
use crate::error::{EngineError, Result};
use crate::models::UserStats;

/// Award each ID: earned set, points, then the durable log row. Both the
/// in-memory and durable updates complete before this returns.
pub fn apply_awards(
    store: &StatsStore,
    stats: &mut UserStats,
    ids: &[&'static str],
    earned_at: DateTime<Utc>,
) -> Result<()> {
    for id in ids {
        let def =
            catalog::get(id).ok_or_else(|| EngineError::UnknownAchievement((*id).to_string()))?;

        stats.achievements.push(def.id.to_string());
        stats.total_points += def.points;
        store.append_achievement(def.id, earned_at)?;
        info!("[AWARD] {} (+{} pts)", def.id, def.points);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> StatsStore {
        let store = StatsStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store
    }

    fn stats() -> UserStats {
        UserStats::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    fn points_sum(stats: &UserStats) -> i64 {
        stats
            .achievements
            .iter()
            .filter_map(|id| catalog::get(id))
            .map(|def| def.points)
            .sum()
    }

    #[test]
    fn test_awards_update_memory_and_log() {
        let store = store();
        let mut stats = stats();

        apply_awards(&store, &mut stats, &["starter", "night_owl"], Utc::now()).unwrap();

        assert_eq!(stats.achievements, vec!["starter", "night_owl"]);
        assert_eq!(stats.total_points, 20);
        assert_eq!(stats.total_points, points_sum(&stats));
        assert_eq!(store.list_achievements().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let store = store();
        let mut stats = stats();

        let err = apply_awards(&store, &mut stats, &["no_such_badge"], Utc::now()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAchievement(_)));
        assert_eq!(stats.total_points, 0);
        assert!(stats.achievements.is_empty());
    }
}
