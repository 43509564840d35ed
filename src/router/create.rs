use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::user::User;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[validate(url(message = "Avatar must be an URL."))]
    pub avatar: Option<String>,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be 1 to 50 characters long."
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Password must be 1 to 255 characters long."
    ))]
    pub password: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Experience points cannot be negative."))]
    pub exp_point: i64,
}

/// Handler to create user.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state
        .users
        .save(User::of(
            body.email,
            body.avatar,
            body.name,
            body.password,
            body.exp_point,
        ))
        .await?;

    tracing::info!(id = ?user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}
