use crate::engine::Engine;
use crate::engine::notice::{LogNotifier, Notifier};
use crate::engine::rollover::RolloverOutcome;
use crate::errors::AppError;
use crate::models::AppData;
use crate::state::AppState;
use crate::storage::persist_data;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::error;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves a client-supplied rollover date. Days after `today` are refused.
pub fn requested_date(requested: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match requested {
        Some(date) if date > today => Err(AppError::bad_request(format!(
            "rollover date {date} is after today ({today})"
        ))),
        Some(date) => Ok(date),
        None => Ok(today),
    }
}

/// Rolls the board over to `date` and persists when anything changed.
pub async fn roll_over_to(
    state: &AppState,
    date: NaiveDate,
    notifier: &mut (dyn Notifier + Send),
) -> Result<RolloverOutcome, AppError> {
    let mut data = state.data.lock().await;
    roll_over_locked(state, &mut data, date, notifier).await
}

/// Same as [`roll_over_to`] for a caller that already holds the state lock.
pub async fn roll_over_locked(
    state: &AppState,
    data: &mut AppData,
    date: NaiveDate,
    notifier: &mut (dyn Notifier + Send),
) -> Result<RolloverOutcome, AppError> {
    let outcome = Engine::new(data, &state.config, notifier).roll_over(date);
    if outcome.advances_date() {
        persist_data(&state.data_path, data).await?;
    }
    Ok(outcome)
}

/// Checks the local date every `period`, starting one period from now.
pub fn spawn_day_watcher(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if let Err(err) = roll_over_to(&state, today(), &mut LogNotifier).await {
                error!("day change processing failed: {}", err.message);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use axum::http::StatusCode;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[test]
    fn future_rollover_dates_are_refused() {
        let err = requested_date(Some(day(11)), day(10)).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(requested_date(Some(day(10)), day(10)).unwrap(), day(10));
        assert_eq!(requested_date(Some(day(3)), day(10)).unwrap(), day(3));
        assert_eq!(requested_date(None, day(10)).unwrap(), day(10));
    }

    #[tokio::test]
    async fn locked_rollover_persists_the_processed_day() {
        let mut path = std::env::temp_dir();
        path.push(format!("xp_dashboard_clock_{}.json", std::process::id()));
        let mut data = AppData::default();
        data.last_processed_date = Some(day(1));
        let state = AppState::new(path.clone(), data, EngineConfig::default());

        let mut notices = Vec::new();
        let outcome = {
            let mut data = state.data.lock().await;
            roll_over_locked(&state, &mut data, day(2), &mut notices).await.unwrap()
        };
        let stored = crate::storage::load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert!(outcome.penalized());
        assert_eq!(stored.last_processed_date, Some(day(2)));
        assert_eq!(stored, *state.data.lock().await);
    }
}
