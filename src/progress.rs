use crate::engine::items::MissionStatus;
use crate::engine::ledger::LevelCurve;
use crate::models::{AppData, DashboardResponse, ProgressSummary};

pub fn build_progress(data: &AppData, curve: &LevelCurve) -> ProgressSummary {
    let total = data.total_xp.total();
    let level = curve.level_for(total);

    let mut missions_completed = 0;
    let mut missions_failed = 0;
    for mission in &data.missions {
        match mission.status {
            MissionStatus::Completed => missions_completed += 1,
            MissionStatus::Failed => missions_failed += 1,
            MissionStatus::InProgress => {}
        }
    }

    ProgressSummary {
        total_xp: total,
        level: level.level,
        level_progress: level.progress,
        xp_per_level: level.xp_per_level,
        max_level: level.max_level,
        at_max_level: level.at_max_level,
        coins: curve.coins_for(total),
        habits_completed: data.habits.iter().filter(|habit| habit.completed).count(),
        habits_total: data.habits.len(),
        missions_completed,
        missions_failed,
        missions_total: data.missions.len(),
        achievements_unlocked: data
            .achievements
            .iter()
            .filter(|achievement| achievement.unlocked)
            .count(),
        achievements_total: data.achievements.len(),
        affordable_rewards: data
            .rewards
            .iter()
            .filter(|reward| reward.available && reward.cost <= total)
            .count(),
        last_processed_date: data.last_processed_date,
    }
}

pub fn build_dashboard(data: &AppData, curve: &LevelCurve) -> DashboardResponse {
    DashboardResponse {
        data: data.clone(),
        progress: build_progress(data, curve),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn seed_progress_starts_at_level_one() {
        let data = AppData::default();
        let progress = build_progress(&data, &LevelCurve::default());
        assert_eq!(progress.level, 1);
        assert_eq!(progress.total_xp, 0);
        assert_eq!(progress.habits_total, 3);
        assert_eq!(progress.missions_total, 4);
        assert_eq!(progress.missions_completed, 1);
        assert_eq!(progress.achievements_unlocked, 0);
        assert_eq!(progress.affordable_rewards, 0);
    }

    #[test]
    fn progress_tracks_xp_and_collections() {
        let mut data = AppData::default();
        data.total_xp.apply_delta(260);
        data.habits[0].toggle(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        data.missions[0].status = MissionStatus::Failed;
        data.achievements[1].unlocked = true;

        let progress = build_progress(&data, &LevelCurve::default());
        assert_eq!(progress.level, 3);
        assert_eq!(progress.level_progress, 60);
        assert_eq!(progress.coins, 26);
        assert_eq!(progress.habits_completed, 1);
        assert_eq!(progress.missions_failed, 1);
        assert_eq!(progress.achievements_unlocked, 1);
        assert_eq!(progress.affordable_rewards, 4);
    }

    #[test]
    fn dashboard_flattens_document() {
        let data = AppData::default();
        let dashboard = build_dashboard(&data, &LevelCurve::default());
        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["total_xp"], 0);
        assert_eq!(value["habits"].as_array().unwrap().len(), 3);
        assert_eq!(value["progress"]["level"], 1);
    }
}
