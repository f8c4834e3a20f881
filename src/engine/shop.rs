use crate::errors::EngineError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON: &str = "🎁";
pub const DEFAULT_COST: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u64,
    pub name: String,
    pub icon: String,
    pub cost: i64,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl Reward {
    /// Missing icons and non-positive costs fall back to the shop defaults.
    pub fn new(id: u64, name: impl Into<String>, icon: Option<String>, cost: Option<i64>) -> Self {
        let icon = icon
            .map(|icon| icon.trim().to_string())
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        Self {
            id,
            name: name.into(),
            icon,
            cost: cost.filter(|cost| *cost > 0).unwrap_or(DEFAULT_COST),
            available: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redemption {
    pub reward: Reward,
    pub affordable: bool,
    pub missing_xp: i64,
}

/// Purchase intent only: reports whether `total` covers the cost.
pub fn redeem(rewards: &[Reward], id: u64, total: i64) -> Result<Redemption, EngineError> {
    let reward = rewards
        .iter()
        .find(|reward| reward.id == id)
        .ok_or(EngineError::RewardNotFound(id))?;
    let affordable = reward.available && total >= reward.cost;
    Ok(Redemption {
        reward: reward.clone(),
        affordable,
        missing_xp: (reward.cost - total).max(0),
    })
}

pub fn remove_reward(rewards: &mut Vec<Reward>, id: u64) -> Result<Reward, EngineError> {
    let index = rewards
        .iter()
        .position(|reward| reward.id == id)
        .ok_or(EngineError::RewardNotFound(id))?;
    Ok(rewards.remove(index))
}
