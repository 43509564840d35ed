mod memory;
mod postgres;
mod repository;

pub use memory::*;
pub use postgres::*;
pub use repository::*;

use serde::{Deserialize, Serialize};

/// User as saved on database.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow,
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Surrogate key, `None` until the user is saved.
    pub id: Option<i64>,
    pub email: String,
    pub avatar: Option<String>,
    pub name: String,
    #[serde(skip)]
    pub password: String,
    pub exp_point: i64,
}

impl User {
    /// Create a new, not yet persisted, [`User`].
    pub fn of(
        email: impl Into<String>,
        avatar: Option<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        exp_point: i64,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            avatar,
            name: name.into(),
            password: password.into(),
            exp_point,
        }
    }

    /// Whether the user has never been saved.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
