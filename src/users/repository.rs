use async_trait::async_trait;
use sqlx::PgPool;

use super::models::user::User;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Inserts the user unless its `user_id` is taken. Returns whether a row was written.
    async fn create(&self, user: &User) -> Result<bool, sqlx::Error>;
}

pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn create(&self, user: &User) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "
            INSERT INTO users (
                user_id, nickname, email, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(&user.user_id)
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
