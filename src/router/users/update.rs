//! Update user data.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::router::Valid;
use crate::user::User;
use crate::{AppState, ServerError};

#[derive(Debug, Default, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[validate(email(message = "Email must be formatted."))]
    email: Option<String>,
    #[validate(url(message = "Avatar must be an URL."))]
    avatar: Option<String>,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be 1 to 50 characters long."
    ))]
    name: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Password must be 1 to 255 characters long."
    ))]
    password: Option<String>,
    #[validate(range(min = 0, message = "Experience points cannot be negative."))]
    exp_point: Option<i64>,
}

pub async fn handler(
    State(state): State<AppState>,
    Extension(mut user): Extension<User>,
    Valid(body): Valid<Body>,
) -> Result<Json<User>, ServerError> {
    if let Some(email) = body.email {
        user.email = email;
    }

    if let Some(avatar) = body.avatar {
        user.avatar = Some(avatar);
    }

    if let Some(name) = body.name {
        user.name = name;
    }

    if let Some(password) = body.password {
        user.password = password;
    }

    if let Some(exp_point) = body.exp_point {
        user.exp_point = exp_point;
    }

    Ok(Json(state.users.save_and_flush(user).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;

    use super::Body;
    use crate::user::User;
    use crate::*;

    #[tokio::test]
    async fn test_update_name() {
        let state = router::state();
        state
            .users
            .save(User::of("test@email.com", None, "test", "1234~!@", 42))
            .await
            .unwrap();
        let app = app(state.clone());

        let req_body = Body {
            name: Some("coby".into()),
            ..Default::default()
        };
        let response = make_request(
            app,
            Method::PATCH,
            "/users/test@email.com",
            json!(req_body).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: User = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.name, "coby");

        let stored = state
            .users
            .find_by_email("test@email.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "coby");
        assert_eq!(stored.email, "test@email.com");
        assert_eq!(stored.exp_point, 42);
        assert_eq!(stored.password, "1234~!@");
    }

    #[tokio::test]
    async fn test_update_to_used_email() {
        let state = router::state();
        for email in ["test1@email.com", "test2@email.com"] {
            state
                .users
                .save(User::of(email, None, "test", "1234~!@", 0))
                .await
                .unwrap();
        }
        let app = app(state.clone());

        let req_body = Body {
            email: Some("test1@email.com".into()),
            ..Default::default()
        };
        let response = make_request(
            app,
            Method::PATCH,
            "/users/test2@email.com",
            json!(req_body).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(
            state
                .users
                .find_by_email("test2@email.com")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_with_negative_points() {
        let state = router::state();
        state
            .users
            .save(User::of("test@email.com", None, "test", "1234~!@", 0))
            .await
            .unwrap();
        let app = app(state);

        let req_body = Body {
            exp_point: Some(-5),
            ..Default::default()
        };
        let response = make_request(
            app,
            Method::PATCH,
            "/users/test@email.com",
            json!(req_body).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
