use std::sync::Arc;

use crate::app::{
    errors::DefaultApiError,
    models::{api_error::ApiError, page::Page},
    util::sqlx::{get_code_from_sqlx_err, SqlStateCodes},
};

use super::{
    dtos::{
        create_transaction_dto::CreateTransactionDto,
        get_transactions_filter_dto::GetTransactionsFilterDto,
    },
    errors::TransactionsApiError,
    models::{transaction::Transaction, transaction_response::TransactionResponse},
    repository::TransactionsRepository,
};

pub struct TransactionsService {
    repository: Arc<dyn TransactionsRepository>,
}

impl TransactionsService {
    pub fn new(repository: Arc<dyn TransactionsRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_transaction(
        &self,
        dto: &CreateTransactionDto,
    ) -> Result<TransactionResponse, ApiError> {
        let transaction = Transaction::new(dto);

        match self.repository.create(&transaction).await {
            Ok(_) => {
                tracing::info!(transaction_id = %transaction.transaction_id, "transaction created");
                Ok(TransactionResponse::from(transaction))
            }
            Err(e) => {
                let Some(code) = get_code_from_sqlx_err(&e)
                else {
                    tracing::error!(%e);
                    return Err(DefaultApiError::InternalServerError.value());
                };

                match code.as_str() {
                    SqlStateCodes::UNIQUE_VIOLATION => {
                        Err(TransactionsApiError::TransactionAlreadyExists.value())
                    }
                    SqlStateCodes::FOREIGN_KEY_VIOLATION => {
                        Err(TransactionsApiError::UserNotFound.value())
                    }
                    _ => {
                        tracing::error!(%e);
                        Err(DefaultApiError::InternalServerError.value())
                    }
                }
            }
        }
    }

    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionResponse, ApiError> {
        match self.repository.get_by_id(transaction_id).await {
            Ok(transaction) => match transaction {
                Some(transaction) => Ok(TransactionResponse::from(transaction)),
                None => Err(TransactionsApiError::TransactionNotFound.value()),
            },
            Err(e) => {
                tracing::error!(%e);
                Err(DefaultApiError::InternalServerError.value())
            }
        }
    }

    pub async fn get_transactions(
        &self,
        dto: &GetTransactionsFilterDto,
    ) -> Result<Page<TransactionResponse>, ApiError> {
        let query = dto.to_query()?;

        match self.repository.get_paginated(&query).await {
            Ok((transactions, total)) => {
                Ok(Page::new(transactions, query.page, query.size, total)
                    .map(TransactionResponse::from))
            }
            Err(e) => {
                tracing::error!(%e);
                Err(DefaultApiError::InternalServerError.value())
            }
        }
    }
}
