use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::user::User;

pub async fn handler(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.find_all().await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use crate::user::User;
    use crate::*;

    #[tokio::test]
    async fn test_list_handler() {
        let state = router::state();
        for (email, name) in [("test1@email.com", "test1"), ("test2@email.com", "test2")] {
            state
                .users
                .save(User::of(email, None, name, "1234~!@", 0))
                .await
                .unwrap();
        }
        let app = app(state);

        let response =
            make_request(app, Method::GET, "/users", String::default()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Vec<User> = serde_json::from_slice(&body).unwrap();
        let names: Vec<_> = body.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["test1", "test2"]);
    }
}
