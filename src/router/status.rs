//! Public instance status.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::Result;

/// Structured status.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Status {
    name: String,
    version: String,
    url: Option<String>,
    /// Number of registered users.
    users: u64,
}

pub async fn handler(State(state): State<AppState>) -> Result<Json<Status>> {
    Ok(Json(Status {
        name: state.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").into(),
        url: state.config.url.clone(),
        users: state.users.count().await?,
    }))
}
