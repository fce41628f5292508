use async_trait::async_trait;
use sqlx::PgPool;

use super::{dtos::get_transactions_filter_dto::TransactionsQuery, models::transaction::Transaction};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionsRepository: Send + Sync {
    async fn create(&self, transaction: &Transaction) -> Result<(), sqlx::Error>;
    /// Looks up by `transaction_id`, with the owning user joined in.
    async fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>, sqlx::Error>;
    /// Returns one page of rows and the total number of matching rows.
    async fn get_paginated(
        &self,
        query: &TransactionsQuery,
    ) -> Result<(Vec<Transaction>, i64), sqlx::Error>;
}

pub struct PgTransactionsRepository {
    pool: PgPool,
}

impl PgTransactionsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionsRepository for PgTransactionsRepository {
    async fn create(&self, transaction: &Transaction) -> Result<(), sqlx::Error> {
        sqlx::query(
            "
            INSERT INTO transactions (
                transaction_id, user_id, amount, type, status,
                description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(&transaction.transaction_id)
        .bind(&transaction.user_id)
        .bind(transaction.amount)
        .bind(&transaction.transaction_type)
        .bind(&transaction.status)
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT transactions.*,
            users.nickname as user_nickname
            FROM transactions
            LEFT JOIN users
            ON transactions.user_id = users.user_id AND users.deleted_at IS NULL
            WHERE transactions.transaction_id = $1
            AND transactions.deleted_at IS NULL
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_paginated(
        &self,
        query: &TransactionsQuery,
    ) -> Result<(Vec<Transaction>, i64), sqlx::Error> {
        let sql = query.to_sql();
        let count_sql = query.to_count_sql();
        let binds = query.binds();

        let mut rows_query = sqlx::query_as::<_, Transaction>(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);

        for value in &binds {
            rows_query = rows_query.bind(value);
            count_query = count_query.bind(value);
        }

        let transactions = rows_query.fetch_all(&self.pool).await?;
        let total = count_query.fetch_one(&self.pool).await?;

        Ok((transactions, total))
    }
}
