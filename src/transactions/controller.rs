use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    app::{
        errors::DefaultApiError,
        models::{api_error::ApiError, api_response::ApiResponse, page::Page},
        structs::{
            json_from_request::JsonFromRequest, path_from_request::PathFromRequest,
            query_from_request::QueryFromRequest,
        },
    },
    AppState,
};

use super::{
    dtos::{
        create_transaction_dto::CreateTransactionDto,
        get_transactions_filter_dto::GetTransactionsFilterDto,
    },
    models::transaction_response::TransactionResponse,
};

static MAX_TRANSACTION_ID_LENGTH: usize = 64;

pub async fn create_transaction(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<CreateTransactionDto>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match state.transactions.create_transaction(&dto).await {
        Ok(transaction) => Ok(Json(ApiResponse::success(transaction))),
        Err(e) => Err(e),
    }
}

pub async fn get_transaction_by_id(
    State(state): State<AppState>,
    PathFromRequest(id): PathFromRequest<String>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    if id.trim().is_empty() || id.len() > MAX_TRANSACTION_ID_LENGTH {
        return Err(DefaultApiError::BadRequest.value());
    }

    match state.transactions.get_transaction(&id).await {
        Ok(transaction) => Ok(Json(ApiResponse::success(transaction))),
        Err(e) => Err(e),
    }
}

pub async fn get_transactions(
    State(state): State<AppState>,
    QueryFromRequest(dto): QueryFromRequest<GetTransactionsFilterDto>,
) -> Result<Json<ApiResponse<Page<TransactionResponse>>>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match state.transactions.get_transactions(&dto).await {
        Ok(page) => Ok(Json(ApiResponse::success(page))),
        Err(e) => Err(e),
    }
}
