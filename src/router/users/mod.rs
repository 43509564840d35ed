//! Users-related HTTP API.
mod delete;
mod get;
mod list;
mod update;

use axum::extract::{Path, Request, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Router, middleware};

use crate::user::User;
use crate::{AppState, ServerError};

/// Custom middleware resolving `{email}` into a [`User`].
async fn lookup(
    State(state): State<AppState>,
    Path(email): Path<String>,
    mut req: Request,
    next: middleware::Next,
) -> Result<Response, ServerError> {
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(ServerError::UserNotFound)?;

    req.extensions_mut().insert::<User>(user);
    Ok(next.run(req).await)
}

pub fn router(state: AppState) -> Router<AppState> {
    let by_email = Router::new()
        // `GET /users/:EMAIL` goes to `get`.
        // `PATCH /users/:EMAIL` goes to `update`.
        // `DELETE /users/:EMAIL` goes to `delete`.
        .route(
            "/{email}",
            get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
        .route_layer(middleware::from_fn_with_state(state, lookup));

    Router::new()
        // `GET /users` goes to `list`.
        // `POST /users` goes to `create`.
        .route(
            "/",
            get(list::handler).post(crate::router::create::handler),
        )
        .merge(by_email)
}
