use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/habits/:id", delete(handlers::remove_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/missions", post(handlers::add_mission))
        .route("/api/missions/:id", delete(handlers::remove_mission))
        .route("/api/missions/:id/advance", post(handlers::advance_mission))
        .route("/api/achievements", get(handlers::get_achievements))
        .route("/api/rewards", post(handlers::add_reward))
        .route("/api/rewards/:id", delete(handlers::remove_reward))
        .route("/api/rewards/:id/redeem", post(handlers::redeem_reward))
        .route("/api/rollover", post(handlers::rollover))
        .with_state(state)
}
