use crate::errors::AppError;
use crate::models::AppData;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => decode_bytes(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub fn decode_bytes(bytes: &[u8]) -> AppData {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(document)) => decode_document(document),
        Ok(_) => {
            error!("data file is not a JSON object");
            AppData::default()
        }
        Err(err) => {
            error!("failed to parse data file: {err}");
            AppData::default()
        }
    }
}

/// Decodes each storage key on its own so one bad entry only resets that entry.
pub fn decode_document(mut document: Map<String, Value>) -> AppData {
    let seed = AppData::default();
    AppData {
        total_xp: take_key(&mut document, "total_xp", seed.total_xp),
        granted_bonus: take_key(&mut document, "granted_bonus", seed.granted_bonus),
        habits: take_key(&mut document, "habits", seed.habits),
        missions: take_key(&mut document, "missions", seed.missions),
        achievements: take_key(&mut document, "achievements", seed.achievements),
        rewards: take_key(&mut document, "rewards", seed.rewards),
        last_processed_date: take_key(&mut document, "last_processed_date", seed.last_processed_date),
    }
}

fn take_key<T: DeserializeOwned>(document: &mut Map<String, Value>, key: &str, fallback: T) -> T {
    match document.remove(key) {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            warn!(key, "malformed stored value, using default: {err}");
            fallback
        }),
        None => {
            warn!(key, "missing stored value, using default");
            fallback
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
