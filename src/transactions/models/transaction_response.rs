use serde::Serialize;

use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_nickname: Option<String>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub status: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_id: transaction.transaction_id,
            user_id: transaction.user_id,
            user_nickname: transaction.user_nickname,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            status: transaction.status,
            description: transaction.description,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}
