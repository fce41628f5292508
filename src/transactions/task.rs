use std::sync::Arc;

use tokio::task;

use crate::{
    app::util::{
        sqlx::{get_code_from_sqlx_err, SqlStateCodes},
        time,
    },
    users::{models::user::User, repository::UsersRepository},
};

use super::{
    enums::{transaction_status::TransactionStatus, transaction_type::TransactionType},
    models::transaction::Transaction,
    repository::TransactionsRepository,
};

/// Seeds fixture users and transactions.
pub struct TransactionsTask {
    transactions: Arc<dyn TransactionsRepository>,
    users: Arc<dyn UsersRepository>,
}

impl TransactionsTask {
    pub fn new(
        transactions: Arc<dyn TransactionsRepository>,
        users: Arc<dyn UsersRepository>,
    ) -> Self {
        Self {
            transactions,
            users,
        }
    }

    pub fn spawn(self) {
        tracing::debug!("seeder spawned");

        task::spawn(async move {
            if let Err(e) = self.create_sample_transactions().await {
                tracing::error!("create_sample_transactions: {:?}", e);
            }
        });
    }

    /// Returns how many transactions were inserted. Fixtures already present are skipped.
    pub async fn create_sample_transactions(&self) -> Result<usize, sqlx::Error> {
        tracing::info!("creating sample transactions");

        let results = futures::future::join_all(
            sample_users().iter().map(|user| self.users.create(user)),
        )
        .await;
        for result in results {
            if let Err(e) = result {
                tracing::error!(%e, "failed to create sample user");
                return Err(e);
            }
        }

        let mut created = 0;

        for transaction in sample_transactions() {
            match self.transactions.create(&transaction).await {
                Ok(_) => {
                    created += 1;
                    tracing::info!(
                        transaction_id = %transaction.transaction_id,
                        "created transaction"
                    );
                }
                Err(e) => match get_code_from_sqlx_err(&e).as_deref() {
                    Some(SqlStateCodes::UNIQUE_VIOLATION) => {
                        tracing::warn!(
                            transaction_id = %transaction.transaction_id,
                            "transaction already exists, skipping"
                        );
                    }
                    _ => {
                        tracing::error!(
                            %e,
                            transaction_id = %transaction.transaction_id,
                            "failed to create transaction"
                        );
                        return Err(e);
                    }
                },
            }
        }

        tracing::info!(created, "sample transactions created");

        Ok(created)
    }
}

fn sample_users() -> Vec<User> {
    vec![
        User::new("user001", "Sample User One", Some("user001@example.com")),
        User::new("user002", "Sample User Two", Some("user002@example.com")),
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        fixture(
            "tx001",
            "user001",
            100.50,
            TransactionType::Credit,
            TransactionStatus::Completed,
            "Sample credit transaction",
        ),
        fixture(
            "tx002",
            "user001",
            50.25,
            TransactionType::Debit,
            TransactionStatus::Completed,
            "Sample debit transaction",
        ),
        fixture(
            "tx003",
            "user002",
            200.00,
            TransactionType::Credit,
            TransactionStatus::Pending,
            "Pending credit transaction",
        ),
        fixture(
            "tx004",
            "user002",
            75.30,
            TransactionType::Debit,
            TransactionStatus::Failed,
            "Failed debit transaction",
        ),
        fixture(
            "tx005",
            "user001",
            300.00,
            TransactionType::Credit,
            TransactionStatus::Completed,
            "Large credit transaction",
        ),
    ]
}

fn fixture(
    transaction_id: &str,
    user_id: &str,
    amount: f64,
    transaction_type: TransactionType,
    status: TransactionStatus,
    description: &str,
) -> Transaction {
    let current_time = time::current_time_in_secs() as i64;

    Transaction {
        id: 0,
        transaction_id: transaction_id.to_string(),
        user_id: user_id.to_string(),
        user_nickname: None,
        amount,
        transaction_type: transaction_type.value().to_string(),
        status: status.value().to_string(),
        description: description.to_string(),
        created_at: current_time,
        updated_at: current_time,
        deleted_at: None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        app::util::sqlx::test_utils::db_error,
        transactions::repository::MockTransactionsRepository,
        users::repository::MockUsersRepository,
    };

    fn users_ok() -> MockUsersRepository {
        let mut users = MockUsersRepository::new();
        users.expect_create().times(2).returning(|_| Ok(true));
        users
    }

    #[test]
    fn fixtures_match_known_values() {
        let fixtures = sample_transactions();

        assert_eq!(fixtures.len(), 5);
        assert_eq!(fixtures[0].transaction_id, "tx001");
        assert_eq!(fixtures[2].status, "pending");
        assert_eq!(fixtures[3].transaction_type, "debit");
        assert_eq!(fixtures[3].status, "failed");
        assert_eq!(fixtures[4].amount, 300.0);
        assert!(fixtures
            .iter()
            .all(|t| t.user_id == "user001" || t.user_id == "user002"));
    }

    #[tokio::test]
    async fn seeds_users_then_all_transactions_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let mut transactions = MockTransactionsRepository::new();
        transactions.expect_create().times(5).returning(move |t| {
            recorder.lock().unwrap().push(t.transaction_id.clone());
            Ok(())
        });

        let task = TransactionsTask::new(Arc::new(transactions), Arc::new(users_ok()));

        assert_eq!(task.create_sample_transactions().await.unwrap(), 5);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["tx001", "tx002", "tx003", "tx004", "tx005"]
        );
    }

    #[tokio::test]
    async fn skips_fixtures_that_already_exist() {
        let mut transactions = MockTransactionsRepository::new();
        transactions.expect_create().times(5).returning(|t| {
            match t.transaction_id.as_str() {
                "tx002" | "tx004" => Err(db_error(SqlStateCodes::UNIQUE_VIOLATION)),
                _ => Ok(()),
            }
        });

        let task = TransactionsTask::new(Arc::new(transactions), Arc::new(users_ok()));

        assert_eq!(task.create_sample_transactions().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn aborts_on_other_store_errors() {
        let mut transactions = MockTransactionsRepository::new();
        transactions.expect_create().times(2).returning(|t| {
            match t.transaction_id.as_str() {
                "tx002" => Err(sqlx::Error::PoolTimedOut),
                _ => Ok(()),
            }
        });

        let task = TransactionsTask::new(Arc::new(transactions), Arc::new(users_ok()));

        assert!(matches!(
            task.create_sample_transactions().await,
            Err(sqlx::Error::PoolTimedOut)
        ));
    }

    #[tokio::test]
    async fn aborts_before_transactions_when_users_fail() {
        let mut users = MockUsersRepository::new();
        users
            .expect_create()
            .returning(|_| Err(sqlx::Error::PoolClosed));
        let mut transactions = MockTransactionsRepository::new();
        transactions.expect_create().never();

        let task = TransactionsTask::new(Arc::new(transactions), Arc::new(users));

        assert!(task.create_sample_transactions().await.is_err());
    }
}
