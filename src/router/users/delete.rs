//! Delete user from database.

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;

use crate::user::User;
use crate::{AppState, ServerError};

pub async fn handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, ServerError> {
    state.users.delete(&user).await?;

    tracing::info!(id = ?user.id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}
