use regex::Regex;

pub mod create_transaction_dto;
pub mod get_transactions_filter_dto;

lazy_static! {
    pub static ref SORT_REGEX: Regex =
        Regex::new(r"^\s*([a-z_]+)(?:\s*[ ,]\s*([A-Za-z]+))?\s*$").unwrap();
}
