pub mod transaction_status;
pub mod transaction_type;
