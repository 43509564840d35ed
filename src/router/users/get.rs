use axum::{Extension, Json};

use crate::user::User;

pub async fn handler(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use crate::user::User;
    use crate::*;

    #[tokio::test]
    async fn test_get_user_handler() {
        let state = router::state();
        let saved = state
            .users
            .save(User::of("test1@email.com", None, "test1", "1234~!@", 123))
            .await
            .unwrap();
        let app = app(state);

        let response = make_request(
            app,
            Method::GET,
            "/users/test1@email.com",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: User = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.id, saved.id);
        assert_eq!(body.name, "test1");
        assert_eq!(body.exp_point, 123);
        // Never sent over the wire.
        assert!(body.password.is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let app = app(router::state());

        let response = make_request(
            app,
            Method::GET,
            "/users/nobody@email.com",
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
