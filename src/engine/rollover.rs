use super::items::{DayStart, Trackable};
use super::ledger::XpLedger;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RolloverOutcome {
    /// No date was recorded yet; `today` becomes the first processed day.
    FirstRun,
    /// `today` is not after the last processed date.
    AlreadyProcessed,
    Processed {
        penalty: i64,
        penalized_items: usize,
        reset_items: usize,
    },
}

impl RolloverOutcome {
    pub fn penalized(&self) -> bool {
        matches!(self, Self::Processed { penalty, .. } if *penalty > 0)
    }

    /// Whether the caller should record `today` as processed.
    pub fn advances_date(&self) -> bool {
        !matches!(self, Self::AlreadyProcessed)
    }
}

/// Runs the day-start sweep once per calendar day.
///
/// `last_processed` is owned by the caller, which must store `today` whenever
/// [`RolloverOutcome::advances_date`] holds. Penalties are summed and charged
/// to the ledger as one negative delta.
pub fn process<'a>(
    today: NaiveDate,
    last_processed: Option<NaiveDate>,
    items: impl IntoIterator<Item = &'a mut dyn Trackable>,
    ledger: &mut XpLedger,
) -> RolloverOutcome {
    match last_processed {
        None => return RolloverOutcome::FirstRun,
        Some(last) if today <= last => return RolloverOutcome::AlreadyProcessed,
        Some(_) => {}
    }

    let mut penalty = 0i64;
    let mut penalized_items = 0;
    let mut reset_items = 0;
    for item in items {
        match item.start_new_day() {
            DayStart::Untouched => {}
            DayStart::Reset => reset_items += 1,
            DayStart::Penalized(xp) => {
                debug!(id = item.id(), name = item.name(), xp = item.xp_value(), "unfinished daily item");
                penalty = penalty.saturating_add(xp);
                penalized_items += 1;
            }
        }
    }

    if penalty != 0 {
        ledger.apply_delta(-penalty);
    }

    RolloverOutcome::Processed {
        penalty,
        penalized_items,
        reset_items,
    }
}
