use serde::{Deserialize, Serialize};

/// Running XP total. `apply_delta` is the only way to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct XpLedger {
    total: i64,
}

impl XpLedger {
    pub fn new(total: i64) -> Self {
        Self { total }
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Adds a signed delta. Negative totals are allowed.
    pub fn apply_delta(&mut self, amount: i64) -> i64 {
        self.total = self.total.saturating_add(amount);
        self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: u32,
    pub progress: i64,
    pub xp_per_level: i64,
    pub max_level: u32,
    pub at_max_level: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCurve {
    pub xp_per_level: i64,
    pub max_level: u32,
    pub xp_per_coin: i64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            max_level: 50,
            xp_per_coin: 10,
        }
    }
}

impl LevelCurve {
    // Euclidean division: progress stays in 0..xp_per_level even for a negative total.
    pub fn level_for(&self, total: i64) -> LevelInfo {
        let raw = total.div_euclid(self.xp_per_level).saturating_add(1);
        let level = raw.clamp(1, i64::from(self.max_level)) as u32;
        LevelInfo {
            level,
            progress: total.rem_euclid(self.xp_per_level),
            xp_per_level: self.xp_per_level,
            max_level: self.max_level,
            at_max_level: level >= self.max_level,
        }
    }

    pub fn coins_for(&self, total: i64) -> i64 {
        total.div_euclid(self.xp_per_coin)
    }
}
