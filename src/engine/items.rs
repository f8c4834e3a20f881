use crate::errors::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn xp(self) -> i64 {
        match self {
            Self::Easy => 5,
            Self::Medium => 10,
            Self::Hard => 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissionStatus {
    #[default]
    InProgress,
    Completed,
    Failed,
}

impl MissionStatus {
    /// Completed -> Failed -> InProgress -> Completed.
    pub fn next(self) -> Self {
        match self {
            Self::Completed => Self::Failed,
            Self::Failed => Self::InProgress,
            Self::InProgress => Self::Completed,
        }
    }
}

/// When a mission is due. Only `Today` takes part in the daily rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DueBucket {
    #[default]
    Today,
    Label(String),
}

impl DueBucket {
    const TODAY: &'static str = "Today";
}

impl From<String> for DueBucket {
    fn from(value: String) -> Self {
        if value == Self::TODAY {
            Self::Today
        } else {
            Self::Label(value)
        }
    }
}

impl From<DueBucket> for String {
    fn from(value: DueBucket) -> Self {
        match value {
            DueBucket::Today => DueBucket::TODAY.to_string(),
            DueBucket::Label(label) => label,
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str(Self::TODAY),
            Self::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    pub cadence: Cadence,
    pub difficulty: Difficulty,
    pub xp: i64,
    pub completed: bool,
    #[serde(default)]
    pub last_completed_date: Option<NaiveDate>,
    // Restored when a completion is undone on the same day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_completed_date: Option<NaiveDate>,
}

impl Habit {
    pub fn new(id: u64, name: impl Into<String>, cadence: Cadence, difficulty: Difficulty) -> Self {
        Self {
            id,
            name: name.into(),
            cadence,
            difficulty,
            xp: difficulty.xp(),
            completed: false,
            last_completed_date: None,
            previous_completed_date: None,
        }
    }

    /// Flips completion and returns the XP delta to apply.
    pub fn toggle(&mut self, today: NaiveDate) -> i64 {
        if self.completed {
            self.completed = false;
            self.last_completed_date = self.previous_completed_date.take();
            -self.xp
        } else {
            self.completed = true;
            self.previous_completed_date = self.last_completed_date.replace(today);
            self.xp
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u64,
    pub name: String,
    pub priority: Priority,
    pub due: DueBucket,
    pub status: MissionStatus,
    pub xp: i64,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

impl Mission {
    pub fn new(id: u64, name: impl Into<String>, priority: Priority, due: DueBucket, xp: i64) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            due,
            status: MissionStatus::InProgress,
            xp,
            completed_date: None,
        }
    }

    /// Moves to the next status. XP only changes at the Completed boundary.
    pub fn advance(&mut self, today: NaiveDate) -> i64 {
        let previous = self.status;
        self.status = previous.next();
        match (previous, self.status) {
            (prev, MissionStatus::Completed) if prev != MissionStatus::Completed => {
                self.completed_date = Some(today);
                self.xp
            }
            (MissionStatus::Completed, _) => -self.xp,
            _ => 0,
        }
    }
}

/// Effect of a day change on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStart {
    Untouched,
    Reset,
    Penalized(i64),
}

/// Shared capability of everything the rollover sweeps.
pub trait Trackable {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
    fn xp_value(&self) -> i64;
    fn start_new_day(&mut self) -> DayStart;
}

impl Trackable for Habit {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn xp_value(&self) -> i64 {
        self.xp
    }

    fn start_new_day(&mut self) -> DayStart {
        if self.cadence != Cadence::Daily {
            return DayStart::Untouched;
        }
        self.previous_completed_date = None;
        if self.completed {
            self.completed = false;
            DayStart::Reset
        } else {
            DayStart::Penalized(self.xp)
        }
    }
}

impl Trackable for Mission {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn xp_value(&self) -> i64 {
        self.xp
    }

    fn start_new_day(&mut self) -> DayStart {
        if self.due != DueBucket::Today {
            return DayStart::Untouched;
        }
        match self.status {
            MissionStatus::InProgress => {
                self.status = MissionStatus::Failed;
                DayStart::Penalized(self.xp)
            }
            MissionStatus::Completed | MissionStatus::Failed => {
                self.status = MissionStatus::InProgress;
                DayStart::Reset
            }
        }
    }
}

pub fn next_id(ids: impl IntoIterator<Item = u64>) -> u64 {
    ids.into_iter().max().map_or(1, |max| max.saturating_add(1))
}

pub fn validate_name(name: &str, kind: &'static str) -> Result<String, EngineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyName { kind });
    }
    Ok(trimmed.to_string())
}

pub fn habit_mut(habits: &mut [Habit], id: u64) -> Result<&mut Habit, EngineError> {
    habits
        .iter_mut()
        .find(|habit| habit.id == id)
        .ok_or(EngineError::HabitNotFound(id))
}

pub fn mission_mut(missions: &mut [Mission], id: u64) -> Result<&mut Mission, EngineError> {
    missions
        .iter_mut()
        .find(|mission| mission.id == id)
        .ok_or(EngineError::MissionNotFound(id))
}

pub fn remove_habit(habits: &mut Vec<Habit>, id: u64) -> Result<Habit, EngineError> {
    let index = habits
        .iter()
        .position(|habit| habit.id == id)
        .ok_or(EngineError::HabitNotFound(id))?;
    Ok(habits.remove(index))
}

pub fn remove_mission(missions: &mut Vec<Mission>, id: u64) -> Result<Mission, EngineError> {
    let index = missions
        .iter()
        .position(|mission| mission.id == id)
        .ok_or(EngineError::MissionNotFound(id))?;
    Ok(missions.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn habit_toggle_is_an_involution() {
        let mut habit = Habit::new(1, "Brush teeth", Cadence::Daily, Difficulty::Easy);
        habit.last_completed_date = Some(day(1));
        let original = habit.clone();

        let first = habit.toggle(day(2));
        assert!(habit.completed);
        assert_eq!(habit.last_completed_date, Some(day(2)));

        let second = habit.toggle(day(2));
        assert_eq!(first + second, 0);
        assert_eq!(habit, original);
    }

    #[test]
    fn habit_xp_follows_difficulty() {
        assert_eq!(Habit::new(1, "a", Cadence::Daily, Difficulty::Easy).xp, 5);
        assert_eq!(Habit::new(2, "b", Cadence::Weekly, Difficulty::Medium).xp, 10);
        assert_eq!(Habit::new(3, "c", Cadence::Daily, Difficulty::Hard).xp, 15);
    }

    #[test]
    fn mission_cycle_only_charges_completed_boundary() {
        let mut mission = Mission::new(1, "Read", Priority::High, DueBucket::Today, 30);
        assert_eq!(mission.advance(day(3)), 30);
        assert_eq!(mission.status, MissionStatus::Completed);
        assert_eq!(mission.completed_date, Some(day(3)));
        assert_eq!(mission.advance(day(3)), -30);
        assert_eq!(mission.status, MissionStatus::Failed);
        assert_eq!(mission.advance(day(3)), 0);
        assert_eq!(mission.status, MissionStatus::InProgress);
    }

    #[test]
    fn full_mission_cycle_nets_zero() {
        let mut mission = Mission::new(1, "Read", Priority::High, DueBucket::Today, 30);
        let net: i64 = (0..3).map(|_| mission.advance(day(3))).sum();
        assert_eq!(net, 0);
        assert_eq!(mission.status, MissionStatus::InProgress);
    }

    #[test]
    fn daily_habit_day_start() {
        let mut done = Habit::new(1, "a", Cadence::Daily, Difficulty::Easy);
        done.toggle(day(1));
        assert_eq!(done.start_new_day(), DayStart::Reset);
        assert!(!done.completed);
        assert_eq!(done.last_completed_date, Some(day(1)));

        let mut missed = Habit::new(2, "b", Cadence::Daily, Difficulty::Hard);
        assert_eq!(missed.start_new_day(), DayStart::Penalized(15));

        let mut weekly = Habit::new(3, "c", Cadence::Weekly, Difficulty::Medium);
        weekly.toggle(day(1));
        assert_eq!(weekly.start_new_day(), DayStart::Untouched);
        assert!(weekly.completed);
    }

    #[test]
    fn mission_day_start() {
        let mut open = Mission::new(1, "a", Priority::Medium, DueBucket::Today, 20);
        assert_eq!(open.start_new_day(), DayStart::Penalized(20));
        assert_eq!(open.status, MissionStatus::Failed);
        assert_eq!(open.start_new_day(), DayStart::Reset);
        assert_eq!(open.status, MissionStatus::InProgress);

        let mut later = Mission::new(2, "b", Priority::Low, DueBucket::Label("30 Oct".into()), 30);
        assert_eq!(later.start_new_day(), DayStart::Untouched);
        assert_eq!(later.status, MissionStatus::InProgress);
    }

    #[test]
    fn due_bucket_round_trips_as_string() {
        let today = serde_json::to_string(&DueBucket::Today).unwrap();
        assert_eq!(today, "\"Today\"");
        let label: DueBucket = serde_json::from_str("\"30 Oct\"").unwrap();
        assert_eq!(label, DueBucket::Label("30 Oct".into()));
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut habits = vec![Habit::new(1, "a", Cadence::Daily, Difficulty::Easy)];
        assert_eq!(habit_mut(&mut habits, 9).unwrap_err(), EngineError::HabitNotFound(9));
        assert_eq!(remove_habit(&mut habits, 9).unwrap_err(), EngineError::HabitNotFound(9));
        let mut missions: Vec<Mission> = Vec::new();
        assert_eq!(
            mission_mut(&mut missions, 4).unwrap_err(),
            EngineError::MissionNotFound(4)
        );
    }

    #[test]
    fn next_id_and_names() {
        assert_eq!(next_id(Vec::new()), 1);
        assert_eq!(next_id([3, 7, 2]), 8);
        assert_eq!(validate_name("  Walk ", "habit").unwrap(), "Walk");
        assert_eq!(
            validate_name("   ", "habit").unwrap_err(),
            EngineError::EmptyName { kind: "habit" }
        );
    }
}
