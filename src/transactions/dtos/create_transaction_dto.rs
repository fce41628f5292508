use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionDto {
    #[validate(length(
        min = 1,
        max = 64,
        message = "userId must be between 1 and 64 characters."
    ))]
    pub user_id: String,
    #[validate(range(min = 0.01, message = "amount must be at least 0.01."))]
    pub amount: f64,
    #[serde(rename = "type")]
    #[validate(length(
        min = 1,
        max = 32,
        message = "type must be between 1 and 32 characters."
    ))]
    pub transaction_type: String,
    #[validate(length(
        min = 1,
        max = 32,
        message = "status must be between 1 and 32 characters."
    ))]
    pub status: String,
    #[validate(length(max = 1024, message = "description must be at most 1024 characters."))]
    pub description: Option<String>,
}
