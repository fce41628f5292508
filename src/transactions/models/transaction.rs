use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    app::util::time, transactions::dtos::create_transaction_dto::CreateTransactionDto,
};

pub static TRANSACTION_SORTABLE_FIELDS: [&str; 3] = ["created_at", "updated_at", "amount"];

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub transaction_id: String,
    pub user_id: String,
    #[sqlx(default)] // joined from users, absent on plain selects
    pub user_nickname: Option<String>,
    pub amount: f64,
    #[sqlx(rename = "type")]
    pub transaction_type: String,
    pub status: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl Transaction {
    pub fn new(dto: &CreateTransactionDto) -> Self {
        let current_time = time::current_time_in_secs() as i64;

        Self {
            id: 0,
            transaction_id: Uuid::new_v4().to_string(),
            user_id: dto.user_id.to_string(),
            user_nickname: None,
            amount: dto.amount,
            transaction_type: dto.transaction_type.to_string(),
            status: dto.status.to_string(),
            description: dto.description.to_owned().unwrap_or_default(),
            created_at: current_time,
            updated_at: current_time,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateTransactionDto {
        CreateTransactionDto {
            user_id: "user001".to_string(),
            amount: 12.5,
            transaction_type: "credit".to_string(),
            status: "pending".to_string(),
            description: None,
        }
    }

    #[test]
    fn new_generates_unique_ids_and_timestamps() {
        let a = Transaction::new(&dto());
        let b = Transaction::new(&dto());

        assert_ne!(a.transaction_id, b.transaction_id);
        assert_eq!(a.transaction_id.len(), 36);
        assert_eq!(a.created_at, a.updated_at);
        assert!(a.created_at > 0);
        assert_eq!(a.deleted_at, None);
    }

    #[test]
    fn new_defaults_description_to_empty() {
        let transaction = Transaction::new(&dto());

        assert_eq!(transaction.description, "");
        assert_eq!(transaction.transaction_type, "credit");
        assert_eq!(transaction.amount, 12.5);
    }
}
