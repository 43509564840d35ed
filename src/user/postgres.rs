//! Handle database requests.

use sqlx::{Pool, Postgres};

use crate::user::{RepositoryError, Result, User, UserRepository};

const COLUMNS: &str = "id, email, avatar, name, password, exp_point";

/// PostgreSQL backed [`UserRepository`].
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new [`PgUserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &User) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, avatar, name, password, exp_point)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {COLUMNS}"#
        ))
        .bind(&user.email)
        .bind(&user.avatar)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.exp_point)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| write_error(err, &user.email))?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn update(&self, id: i64, user: &User) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
                SET email = $2, avatar = $3, name = $4, password = $5, exp_point = $6
                WHERE id = $1
                RETURNING {COLUMNS}"#
        ))
        .bind(id)
        .bind(&user.email)
        .bind(&user.avatar)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.exp_point)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| write_error(err, &user.email))?;

        let Some(saved) = saved else {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound(id));
        };

        tx.commit().await?;

        Ok(saved)
    }
}

#[async_trait::async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: User) -> Result<User> {
        match user.id {
            Some(id) => self.update(id, &user).await,
            None => self.insert(&user).await,
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(id, "user already deleted");
        }

        Ok(())
    }
}

/// Turn a unique constraint violation into [`RepositoryError::DuplicateEmail`].
fn write_error(err: sqlx::Error, email: &str) -> RepositoryError {
    if err
        .as_database_error()
        .is_some_and(|err| err.is_unique_violation())
    {
        RepositoryError::DuplicateEmail(email.to_owned())
    } else {
        RepositoryError::Sql(err)
    }
}
