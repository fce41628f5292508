use std::time::Duration;

use sqlx::{
    migrate::{MigrateError, Migrator},
    postgres::PgPoolOptions,
    PgPool,
};
use tokio_retry::{strategy::FixedInterval, Retry};

use crate::app::env::{Envy, DEFAULT_MAX_CONNECTIONS};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(envy: &Envy) -> Result<PgPool, sqlx::Error> {
    let retry_strategy = FixedInterval::from_millis(2000).take(5);
    let max_connections = envy
        .database_max_connections
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    Retry::spawn(retry_strategy, || async {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(Some(Duration::from_secs(60)))
            .connect(&envy.database_url)
            .await
        {
            Ok(pool) => Ok(pool),
            Err(e) => {
                tracing::warn!("connect failed, retrying: {}", e);
                Err(e)
            }
        }
    })
    .await
}

pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_table_is_created_before_transactions() {
        let descriptions: Vec<&str> = MIGRATOR
            .iter()
            .map(|migration| migration.description.as_ref())
            .collect();

        assert_eq!(descriptions, vec!["create users", "create transactions"]);
        assert!(MIGRATOR
            .iter()
            .zip(MIGRATOR.iter().skip(1))
            .all(|(a, b)| a.version < b.version));
    }
}
