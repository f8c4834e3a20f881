use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    pub name: String,
    pub xp_bonus: i64,
    pub xp_required: i64,
    #[serde(default)]
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(id: u64, name: impl Into<String>, xp_required: i64, xp_bonus: i64) -> Self {
        Self {
            id,
            name: name.into(),
            xp_bonus,
            xp_required,
            unlocked: false,
        }
    }
}

/// What happens to an unlocked achievement once earned XP falls below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelockPolicy {
    /// Stays unlocked forever.
    Never,
    /// Locks again and takes the bonus back.
    #[default]
    Refund,
    /// Locks again, bonus stays granted.
    KeepBonus,
}

impl FromStr for RelockPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "refund" => Ok(Self::Refund),
            "keep-bonus" | "keep_bonus" => Ok(Self::KeepBonus),
            other => Err(format!("unknown relock policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AchievementEvent {
    Unlocked { id: u64, name: String, bonus: i64 },
    Relocked { id: u64, name: String, refund: i64 },
}

impl AchievementEvent {
    /// Signed XP change this event carries for the ledger.
    pub fn delta(&self) -> i64 {
        match self {
            Self::Unlocked { bonus, .. } => *bonus,
            Self::Relocked { refund, .. } => -*refund,
        }
    }
}

/// Compares `earned` XP against every threshold in ascending order.
///
/// `earned` is the ledger total minus every bonus still held in it, so a
/// bonus never counts toward a threshold: not its own on the way down, and
/// not another achievement's on the way up. All thresholds at or below
/// `earned` unlock in the same pass. Bonuses are returned as events rather
/// than applied.
pub fn evaluate(
    earned: i64,
    achievements: &mut [Achievement],
    policy: RelockPolicy,
) -> Vec<AchievementEvent> {
    let mut order: Vec<usize> = (0..achievements.len()).collect();
    order.sort_by_key(|&index| achievements[index].xp_required);

    let mut events = Vec::new();
    for index in order {
        let achievement = &mut achievements[index];
        if earned >= achievement.xp_required && !achievement.unlocked {
            achievement.unlocked = true;
            events.push(AchievementEvent::Unlocked {
                id: achievement.id,
                name: achievement.name.clone(),
                bonus: achievement.xp_bonus,
            });
        } else if earned < achievement.xp_required && achievement.unlocked {
            let refund = match policy {
                RelockPolicy::Never => continue,
                RelockPolicy::Refund => achievement.xp_bonus,
                RelockPolicy::KeepBonus => 0,
            };
            achievement.unlocked = false;
            events.push(AchievementEvent::Relocked {
                id: achievement.id,
                name: achievement.name.clone(),
                refund,
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<Achievement> {
        vec![
            Achievement::new(3, "third", 300, 50),
            Achievement::new(1, "first", 100, 50),
            Achievement::new(2, "second", 200, 50),
        ]
    }

    fn net(events: &[AchievementEvent]) -> i64 {
        events.iter().map(AchievementEvent::delta).sum()
    }

    #[test]
    fn unlocks_every_crossed_threshold_once() {
        let mut achievements = ladder();
        let events = evaluate(250, &mut achievements, RelockPolicy::Refund);

        let ids: Vec<u64> = events
            .iter()
            .map(|event| match event {
                AchievementEvent::Unlocked { id, .. } => *id,
                AchievementEvent::Relocked { id, .. } => panic!("unexpected relock of {id}"),
            })
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(250 + net(&events), 350);

        let again = evaluate(250, &mut achievements, RelockPolicy::Refund);
        assert!(again.is_empty());
    }

    #[test]
    fn bonuses_never_unlock_further_thresholds() {
        let mut achievements = ladder();
        evaluate(250, &mut achievements, RelockPolicy::Refund);
        let events = evaluate(250, &mut achievements, RelockPolicy::Refund);
        assert!(events.is_empty());
        assert!(!achievements[0].unlocked);

        let events = evaluate(300, &mut achievements, RelockPolicy::Refund);
        assert_eq!(net(&events), 50);
        assert!(achievements.iter().all(|a| a.unlocked));
    }

    #[test]
    fn refund_policy_takes_bonus_back() {
        let mut achievements = ladder();
        evaluate(250, &mut achievements, RelockPolicy::Refund);
        let events = evaluate(150, &mut achievements, RelockPolicy::Refund);
        assert_eq!(net(&events), -50);
        let second = achievements.iter().find(|a| a.id == 2).unwrap();
        assert!(!second.unlocked);
    }

    #[test]
    fn keep_bonus_policy_relocks_without_refund() {
        let mut achievements = ladder();
        evaluate(250, &mut achievements, RelockPolicy::KeepBonus);
        let events = evaluate(50, &mut achievements, RelockPolicy::KeepBonus);
        assert_eq!(events.len(), 2);
        assert_eq!(net(&events), 0);
        assert!(achievements.iter().all(|a| !a.unlocked));
    }

    #[test]
    fn never_policy_keeps_unlocks() {
        let mut achievements = ladder();
        evaluate(250, &mut achievements, RelockPolicy::Never);
        let events = evaluate(-10, &mut achievements, RelockPolicy::Never);
        assert!(events.is_empty());
        assert_eq!(achievements.iter().filter(|a| a.unlocked).count(), 2);
    }

    #[test]
    fn policy_parses_from_env_strings() {
        assert_eq!("never".parse::<RelockPolicy>().unwrap(), RelockPolicy::Never);
        assert_eq!("Refund".parse::<RelockPolicy>().unwrap(), RelockPolicy::Refund);
        assert_eq!("keep-bonus".parse::<RelockPolicy>().unwrap(), RelockPolicy::KeepBonus);
        assert!("sometimes".parse::<RelockPolicy>().is_err());
    }
}
