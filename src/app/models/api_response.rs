use serde::Serialize;

pub static SUCCESS_CODE: u16 = 0;

/// Success half of the response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "ok".to_string(),
            data,
        }
    }
}
