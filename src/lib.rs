pub mod app;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod seed;
pub mod state;
pub mod storage;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use storage::load_data;
