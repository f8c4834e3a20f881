//! Progression rules: XP ledger, habit and mission transitions, achievement
//! unlocks and the daily rollover.
//!
//! [`Engine`] is the only place these pieces are combined. Every event runs
//! in the same order: mutate the item, apply its delta to the ledger, then
//! re-evaluate achievements against the new total. Persisting is left to the
//! caller, which holds the state lock across the whole sequence.

pub mod achievements;
pub mod items;
pub mod ledger;
pub mod notice;
pub mod rollover;
pub mod shop;

use crate::errors::EngineError;
use crate::models::AppData;
use achievements::{AchievementEvent, RelockPolicy};
use chrono::NaiveDate;
use items::{Cadence, Difficulty, DueBucket, Habit, Mission, MissionStatus, Priority, Trackable};
use ledger::LevelCurve;
use notice::{Notice, NoticeKind, Notifier};
use rollover::RolloverOutcome;
use shop::{Redemption, Reward};
use tracing::{debug, info};

pub const DEFAULT_MISSION_XP: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub curve: LevelCurve,
    pub relock_policy: RelockPolicy,
}

pub struct Engine<'a, N: Notifier + ?Sized> {
    data: &'a mut AppData,
    config: &'a EngineConfig,
    notifier: &'a mut N,
}

impl<'a, N: Notifier + ?Sized> Engine<'a, N> {
    pub fn new(data: &'a mut AppData, config: &'a EngineConfig, notifier: &'a mut N) -> Self {
        Self {
            data,
            config,
            notifier,
        }
    }

    pub fn toggle_habit(&mut self, id: u64, today: NaiveDate) -> Result<Habit, EngineError> {
        let habit = items::habit_mut(&mut self.data.habits, id)?;
        let delta = habit.toggle(today);
        let habit = habit.clone();

        let notice = if habit.completed {
            Notice::new(NoticeKind::Success, format!("Habit completed! +{} XP", habit.xp))
        } else {
            Notice::new(NoticeKind::Error, "Habit unchecked")
        };
        self.notifier.notify(notice.with_detail(habit.name.clone()));

        self.credit(delta);
        Ok(habit)
    }

    pub fn advance_mission(&mut self, id: u64, today: NaiveDate) -> Result<Mission, EngineError> {
        let mission = items::mission_mut(&mut self.data.missions, id)?;
        let delta = mission.advance(today);
        let mission = mission.clone();

        let notice = match mission.status {
            MissionStatus::Completed => Notice::new(
                NoticeKind::Success,
                format!("Mission completed! +{} XP", mission.xp),
            ),
            MissionStatus::Failed => Notice::new(NoticeKind::Warning, "Mission marked as failed"),
            MissionStatus::InProgress => Notice::new(NoticeKind::Info, "Mission in progress"),
        };
        self.notifier.notify(notice.with_detail(mission.name.clone()));

        self.credit(delta);
        Ok(mission)
    }

    pub fn add_habit(
        &mut self,
        name: &str,
        cadence: Cadence,
        difficulty: Difficulty,
    ) -> Result<Habit, EngineError> {
        let name = self.checked_name(name, "habit")?;
        let id = items::next_id(self.data.habits.iter().map(|habit| habit.id));
        let habit = Habit::new(id, name, cadence, difficulty);
        self.data.habits.push(habit.clone());
        self.notifier
            .notify(Notice::new(NoticeKind::Success, "New habit added").with_detail(habit.name.clone()));
        Ok(habit)
    }

    pub fn remove_habit(&mut self, id: u64) -> Result<Habit, EngineError> {
        let habit = items::remove_habit(&mut self.data.habits, id)?;
        self.notifier
            .notify(Notice::new(NoticeKind::Success, "Habit removed").with_detail(habit.name.clone()));
        Ok(habit)
    }

    pub fn add_mission(
        &mut self,
        name: &str,
        priority: Priority,
        due: DueBucket,
        xp: Option<i64>,
    ) -> Result<Mission, EngineError> {
        let name = self.checked_name(name, "mission")?;
        let id = items::next_id(self.data.missions.iter().map(|mission| mission.id));
        let xp = xp.filter(|xp| *xp > 0).unwrap_or(DEFAULT_MISSION_XP);
        let mission = Mission::new(id, name, priority, due, xp);
        self.data.missions.push(mission.clone());
        self.notifier.notify(
            Notice::new(NoticeKind::Success, "New mission added").with_detail(mission.name.clone()),
        );
        Ok(mission)
    }

    pub fn remove_mission(&mut self, id: u64) -> Result<Mission, EngineError> {
        let mission = items::remove_mission(&mut self.data.missions, id)?;
        self.notifier.notify(
            Notice::new(NoticeKind::Success, "Mission removed").with_detail(mission.name.clone()),
        );
        Ok(mission)
    }

    pub fn add_reward(
        &mut self,
        name: &str,
        icon: Option<String>,
        cost: Option<i64>,
    ) -> Result<Reward, EngineError> {
        let name = self.checked_name(name, "reward")?;
        let id = items::next_id(self.data.rewards.iter().map(|reward| reward.id));
        let reward = Reward::new(id, name, icon, cost);
        self.data.rewards.push(reward.clone());
        self.notifier.notify(
            Notice::new(NoticeKind::Success, "New reward added").with_detail(reward.name.clone()),
        );
        Ok(reward)
    }

    pub fn remove_reward(&mut self, id: u64) -> Result<Reward, EngineError> {
        let reward = shop::remove_reward(&mut self.data.rewards, id)?;
        self.notifier
            .notify(Notice::new(NoticeKind::Success, "Reward removed").with_detail(reward.name.clone()));
        Ok(reward)
    }

    pub fn redeem_reward(&mut self, id: u64) -> Result<Redemption, EngineError> {
        let redemption = shop::redeem(&self.data.rewards, id, self.data.total_xp.total())?;
        let notice = if redemption.affordable {
            Notice::new(NoticeKind::Success, format!("Enjoy your reward! {}", redemption.reward.icon))
        } else {
            Notice::new(
                NoticeKind::Warning,
                format!("{} more XP needed", redemption.missing_xp),
            )
        };
        self.notifier
            .notify(notice.with_detail(redemption.reward.name.clone()));
        Ok(redemption)
    }

    /// Day-change handler. Records `today` as processed unless it already was.
    pub fn roll_over(&mut self, today: NaiveDate) -> RolloverOutcome {
        let data = &mut *self.data;
        let items = data
            .habits
            .iter_mut()
            .map(|habit| habit as &mut dyn Trackable)
            .chain(data.missions.iter_mut().map(|mission| mission as &mut dyn Trackable));
        let outcome = rollover::process(today, data.last_processed_date, items, &mut data.total_xp);

        if outcome.advances_date() {
            data.last_processed_date = Some(today);
        }

        match outcome {
            RolloverOutcome::FirstRun => {
                info!(%today, "first day recorded");
            }
            RolloverOutcome::AlreadyProcessed => {
                debug!(%today, "rollover already processed");
            }
            RolloverOutcome::Processed {
                penalty,
                penalized_items,
                reset_items,
            } => {
                info!(%today, penalty, penalized_items, reset_items, "rollover processed");
                let notice = if outcome.penalized() {
                    Notice::new(
                        NoticeKind::Error,
                        format!("{penalty} XP deducted for unfinished daily tasks"),
                    )
                    .with_detail("Complete your daily habits and missions to avoid losing points")
                } else {
                    Notice::new(NoticeKind::Info, "New day! Your habits and missions have been reset")
                        .with_detail("Your points are intact")
                };
                self.notifier.notify(notice);
                self.evaluate_achievements();
            }
        }
        outcome
    }

    fn credit(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        self.data.total_xp.apply_delta(delta);
        self.evaluate_achievements();
    }

    // Thresholds see earned XP only; bonuses still held are excluded.
    fn evaluate_achievements(&mut self) {
        let earned = self.data.total_xp.total().saturating_sub(self.data.granted_bonus);
        let events = achievements::evaluate(
            earned,
            &mut self.data.achievements,
            self.config.relock_policy,
        );
        for event in events {
            self.data.total_xp.apply_delta(event.delta());
            self.data.granted_bonus = self.data.granted_bonus.saturating_add(event.delta());
            match &event {
                AchievementEvent::Unlocked { id, name, bonus } => {
                    info!(id, bonus, "achievement unlocked");
                    self.notifier.notify(
                        Notice::new(NoticeKind::Success, "Achievement unlocked!")
                            .with_detail(format!("{name}: +{bonus} XP")),
                    );
                }
                AchievementEvent::Relocked { id, name, refund } => {
                    info!(id, refund, "achievement locked again");
                    self.notifier.notify(
                        Notice::new(NoticeKind::Warning, "Achievement locked again")
                            .with_detail(name.clone()),
                    );
                }
            }
        }
    }

    fn checked_name(&mut self, name: &str, kind: &'static str) -> Result<String, EngineError> {
        items::validate_name(name, kind).inspect_err(|err| {
            self.notifier
                .notify(Notice::new(NoticeKind::Error, err.to_string()));
        })
    }
}
