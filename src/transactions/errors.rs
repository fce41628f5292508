use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum TransactionsApiError {
    TransactionNotFound,
    TransactionAlreadyExists,
    UserNotFound,
}

impl TransactionsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::TransactionNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Transaction not found.".to_string(),
            },
            Self::TransactionAlreadyExists => ApiError {
                code: StatusCode::CONFLICT,
                message: "Transaction already exists.".to_string(),
            },
            Self::UserNotFound => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "User not found.".to_string(),
            },
        }
    }
}
