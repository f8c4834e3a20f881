use crate::engine::achievements::Achievement;
use crate::engine::items::{Cadence, Difficulty, DueBucket, Habit, Mission, Priority};
use crate::engine::ledger::XpLedger;
use crate::engine::notice::Notice;
use crate::engine::shop::Reward;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The persisted document. Each field is one storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    pub total_xp: XpLedger,
    /// Achievement bonus XP currently included in `total_xp`.
    #[serde(default)]
    pub granted_bonus: i64,
    pub habits: Vec<Habit>,
    pub missions: Vec<Mission>,
    pub achievements: Vec<Achievement>,
    pub rewards: Vec<Reward>,
    pub last_processed_date: Option<NaiveDate>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            total_xp: XpLedger::default(),
            granted_bonus: 0,
            habits: crate::seed::habits(),
            missions: crate::seed::missions(),
            achievements: crate::seed::achievements(),
            rewards: crate::seed::rewards(),
            last_processed_date: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct NewMissionRequest {
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: DueBucket,
    pub xp: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewRewardRequest {
    pub name: String,
    pub icon: Option<String>,
    pub cost: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RolloverRequest {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_xp: i64,
    pub level: u32,
    pub level_progress: i64,
    pub xp_per_level: i64,
    pub max_level: u32,
    pub at_max_level: bool,
    pub coins: i64,
    pub habits_completed: usize,
    pub habits_total: usize,
    pub missions_completed: usize,
    pub missions_failed: usize,
    pub missions_total: usize,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
    pub affordable_rewards: usize,
    pub last_processed_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub result: T,
    pub progress: ProgressSummary,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub data: AppData,
    pub progress: ProgressSummary,
}
