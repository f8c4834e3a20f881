use crate::clock::{requested_date, roll_over_locked, today};
use crate::engine::Engine;
use crate::engine::achievements::Achievement;
use crate::engine::items::{Habit, Mission};
use crate::engine::notice::Notice;
use crate::engine::rollover::RolloverOutcome;
use crate::engine::shop::{Redemption, Reward};
use crate::errors::{AppError, EngineError};
use crate::models::{
    ActionResponse, AppData, DashboardResponse, NewHabitRequest, NewMissionRequest,
    NewRewardRequest, ProgressSummary, RolloverRequest,
};
use crate::progress::{build_dashboard, build_progress};
use crate::state::AppState;
use crate::storage::persist_data;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let data = state.data.lock().await;
    Json(build_dashboard(&data, &state.config.curve))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressSummary> {
    let data = state.data.lock().await;
    Json(build_progress(&data, &state.config.curve))
}

pub async fn get_achievements(State(state): State<AppState>) -> Json<Vec<Achievement>> {
    let data = state.data.lock().await;
    Json(data.achievements.clone())
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<Json<ActionResponse<Habit>>, AppError> {
    apply(&state, |engine| {
        engine.add_habit(&payload.name, payload.cadence, payload.difficulty)
    })
    .await
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Habit>>, AppError> {
    let date = today();
    apply(&state, |engine| engine.toggle_habit(id, date)).await
}

pub async fn remove_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Habit>>, AppError> {
    apply(&state, |engine| engine.remove_habit(id)).await
}

pub async fn add_mission(
    State(state): State<AppState>,
    Json(payload): Json<NewMissionRequest>,
) -> Result<Json<ActionResponse<Mission>>, AppError> {
    apply(&state, |engine| {
        engine.add_mission(&payload.name, payload.priority, payload.due.clone(), payload.xp)
    })
    .await
}

pub async fn advance_mission(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Mission>>, AppError> {
    let date = today();
    apply(&state, |engine| engine.advance_mission(id, date)).await
}

pub async fn remove_mission(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Mission>>, AppError> {
    apply(&state, |engine| engine.remove_mission(id)).await
}

pub async fn add_reward(
    State(state): State<AppState>,
    Json(payload): Json<NewRewardRequest>,
) -> Result<Json<ActionResponse<Reward>>, AppError> {
    apply(&state, |engine| {
        engine.add_reward(&payload.name, payload.icon.clone(), payload.cost)
    })
    .await
}

pub async fn remove_reward(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Reward>>, AppError> {
    apply(&state, |engine| engine.remove_reward(id)).await
}

pub async fn redeem_reward(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActionResponse<Redemption>>, AppError> {
    apply(&state, |engine| engine.redeem_reward(id)).await
}

pub async fn rollover(
    State(state): State<AppState>,
    payload: Option<Json<RolloverRequest>>,
) -> Result<Json<ActionResponse<RolloverOutcome>>, AppError> {
    let date = requested_date(payload.and_then(|Json(request)| request.date), today())?;
    let mut data = state.data.lock().await;
    let mut notices = Vec::new();
    let outcome = roll_over_locked(&state, &mut data, date, &mut notices).await?;

    Ok(Json(respond(outcome, &data, &state, notices)))
}

// Holds the lock across mutate, ledger, achievements and persist.
async fn apply<T, F>(state: &AppState, action: F) -> Result<Json<ActionResponse<T>>, AppError>
where
    T: Serialize,
    F: FnOnce(&mut Engine<'_, Vec<Notice>>) -> Result<T, EngineError>,
{
    let mut data = state.data.lock().await;
    let mut notices = Vec::new();
    let outcome = {
        let mut engine = Engine::new(&mut data, &state.config, &mut notices);
        action(&mut engine)
    };
    let result = match outcome {
        Ok(result) => result,
        Err(err) => return Err(AppError::from(err).with_notices(notices)),
    };

    persist_data(&state.data_path, &data).await?;

    Ok(Json(respond(result, &data, state, notices)))
}

fn respond<T: Serialize>(
    result: T,
    data: &AppData,
    state: &AppState,
    notices: Vec<Notice>,
) -> ActionResponse<T> {
    ActionResponse {
        result,
        progress: build_progress(data, &state.config.curve),
        notices,
    }
}
