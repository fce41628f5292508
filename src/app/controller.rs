use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

use super::models::{api_error::ApiError, api_response::ApiResponse};

pub async fn get_root(
    State(_state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    Ok(Json(ApiResponse::success(json!({}))))
}
