use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::{
    app::models::api_error::ApiError,
    transactions::models::transaction::TRANSACTION_SORTABLE_FIELDS,
};

use super::SORT_REGEX;

pub static DEFAULT_PAGE: u32 = 1;
pub static DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct GetTransactionsFilterDto {
    #[validate(range(min = 1, message = "page must be at least 1."))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "size must be between 1 and 100."))]
    pub size: Option<u32>,
    #[validate(regex(path = "SORT_REGEX", message = "Malformed sort query."))]
    pub sort: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 32, message = "type must be at most 32 characters."))]
    pub transaction_type: Option<String>,
    #[validate(length(max = 32, message = "status must be at most 32 characters."))]
    pub status: Option<String>,
    #[validate(length(max = 256, message = "search must be at most 256 characters."))]
    pub search: Option<String>,
}

/// A filter with defaults applied and sort resolved against the sortable columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsQuery {
    pub page: u32,
    pub size: u32,
    pub sort_field: &'static str,
    pub sort_order: &'static str,
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl GetTransactionsFilterDto {
    pub fn to_query(&self) -> Result<TransactionsQuery, ApiError> {
        let mut sort_field = "created_at";
        let mut sort_order = "DESC";

        if let Some(sort) = &self.sort {
            let Some(captures) = SORT_REGEX.captures(sort)
            else {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: "Malformed sort query.".to_string(),
                });
            };

            let Some(field) = TRANSACTION_SORTABLE_FIELDS
                .iter()
                .find(|field| **field == &captures[1])
            else {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: "Invalid sort field.".to_string(),
                });
            };
            sort_field = *field;

            if let Some(order) = captures.get(2) {
                sort_order = match order.as_str().to_uppercase().as_str() {
                    "ASC" => "ASC",
                    "DESC" => "DESC",
                    _ => {
                        return Err(ApiError {
                            code: StatusCode::BAD_REQUEST,
                            message: "Malformed sort query.".to_string(),
                        })
                    }
                };
            }
        }

        Ok(TransactionsQuery {
            page: self.page.unwrap_or(DEFAULT_PAGE).max(1),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100),
            sort_field,
            sort_order,
            transaction_type: non_empty(&self.transaction_type),
            status: non_empty(&self.status),
            search: non_empty(&self.search),
        })
    }
}

impl TransactionsQuery {
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }

    /// Values for the `$n` placeholders, in placeholder order.
    pub fn binds(&self) -> Vec<String> {
        let mut binds = Vec::new();

        if let Some(transaction_type) = &self.transaction_type {
            binds.push(transaction_type.to_string());
        }
        if let Some(status) = &self.status {
            binds.push(status.to_string());
        }
        if let Some(search) = &self.search {
            binds.push(["%", &escape_like(search), "%"].concat());
        }

        binds
    }

    pub fn to_sql(&self) -> String {
        let mut sql = "SELECT transactions.*".to_string();

        // JOIN USER
        sql.push_str(
            ", users.nickname AS user_nickname FROM transactions \
             LEFT JOIN users ON transactions.user_id = users.user_id \
             AND users.deleted_at IS NULL",
        );

        sql.push_str(&self.where_sql());

        // ORDER BY
        sql.push_str(
            &[
                " ORDER BY transactions.",
                self.sort_field,
                " ",
                self.sort_order,
                ", transactions.id ",
                self.sort_order,
            ]
            .concat(),
        );

        // LIMIT
        sql.push_str(
            &[
                " LIMIT ",
                &self.size.to_string(),
                " OFFSET ",
                &self.offset().to_string(),
            ]
            .concat(),
        );

        tracing::debug!(%sql);

        sql
    }

    pub fn to_count_sql(&self) -> String {
        let mut sql = "SELECT COUNT(*) FROM transactions".to_string();
        sql.push_str(&self.where_sql());

        sql
    }

    fn where_sql(&self) -> String {
        let mut clauses = vec!["transactions.deleted_at IS NULL".to_string()];

        let mut index: u8 = 0;

        // WHERE CLAUSES
        if self.transaction_type.is_some() {
            index += 1;
            clauses.push(["transactions.type = $", &index.to_string()].concat());
        }
        if self.status.is_some() {
            index += 1;
            clauses.push(["transactions.status = $", &index.to_string()].concat());
        }
        if self.search.is_some() {
            index += 1;
            clauses.push(["transactions.description LIKE $", &index.to_string()].concat());
        }

        [" WHERE ", &clauses.join(" AND ")].concat()
    }
}

/// Blank values are dropped; anything else is kept as sent.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_sort(sort: &str) -> GetTransactionsFilterDto {
        GetTransactionsFilterDto {
            sort: Some(sort.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn applies_defaults() {
        let query = GetTransactionsFilterDto::default().to_query().unwrap();

        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert_eq!(query.sort_field, "created_at");
        assert_eq!(query.sort_order, "DESC");
        assert_eq!(query.offset(), 0);
        assert!(query.binds().is_empty());
    }

    #[test]
    fn default_sql_only_hides_soft_deleted_rows() {
        let query = GetTransactionsFilterDto::default().to_query().unwrap();

        assert_eq!(
            query.to_sql(),
            "SELECT transactions.*, users.nickname AS user_nickname FROM transactions \
             LEFT JOIN users ON transactions.user_id = users.user_id AND users.deleted_at IS NULL \
             WHERE transactions.deleted_at IS NULL \
             ORDER BY transactions.created_at DESC, transactions.id DESC LIMIT 10 OFFSET 0"
        );
        assert_eq!(
            query.to_count_sql(),
            "SELECT COUNT(*) FROM transactions WHERE transactions.deleted_at IS NULL"
        );
    }

    #[test]
    fn numbers_placeholders_in_bind_order() {
        let dto = GetTransactionsFilterDto {
            page: Some(3),
            size: Some(20),
            transaction_type: Some("credit".to_string()),
            status: Some("completed".to_string()),
            search: Some("coffee".to_string()),
            ..Default::default()
        };
        let query = dto.to_query().unwrap();

        let sql = query.to_sql();
        assert!(sql.contains("transactions.type = $1"));
        assert!(sql.contains("transactions.status = $2"));
        assert!(sql.contains("transactions.description LIKE $3"));
        assert!(sql.ends_with("LIMIT 20 OFFSET 40"));
        assert!(query.to_count_sql().contains("transactions.description LIKE $3"));
        assert_eq!(query.binds(), vec!["credit", "completed", "%coffee%"]);
    }

    #[test]
    fn skips_blank_filters() {
        let dto = GetTransactionsFilterDto {
            transaction_type: Some("".to_string()),
            status: Some("pending".to_string()),
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let query = dto.to_query().unwrap();

        assert!(query.to_sql().contains("transactions.status = $1"));
        assert!(!query.to_sql().contains("transactions.type"));
        assert_eq!(query.binds(), vec!["pending"]);
    }

    #[test]
    fn binds_filters_without_trimming() {
        let dto = GetTransactionsFilterDto {
            transaction_type: Some("credit ".to_string()),
            search: Some(" credit".to_string()),
            ..Default::default()
        };

        assert_eq!(dto.to_query().unwrap().binds(), vec!["credit ", "% credit%"]);
    }

    #[test]
    fn escapes_like_wildcards_in_search() {
        let dto = GetTransactionsFilterDto {
            search: Some("50%_off\\".to_string()),
            ..Default::default()
        };

        assert_eq!(dto.to_query().unwrap().binds(), vec!["%50\\%\\_off\\\\%"]);
    }

    #[test]
    fn parses_sort_with_space_or_comma() {
        let query = with_sort("amount asc").to_query().unwrap();
        assert_eq!((query.sort_field, query.sort_order), ("amount", "ASC"));

        let query = with_sort("updated_at,DESC").to_query().unwrap();
        assert_eq!((query.sort_field, query.sort_order), ("updated_at", "DESC"));

        let query = with_sort("amount").to_query().unwrap();
        assert_eq!((query.sort_field, query.sort_order), ("amount", "DESC"));
        assert!(query
            .to_sql()
            .contains("ORDER BY transactions.amount DESC, transactions.id DESC"));
    }

    #[test]
    fn rejects_unknown_sort_field() {
        let e = with_sort("description asc").to_query().unwrap_err();

        assert_eq!(e.code, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Invalid sort field.");
    }

    #[test]
    fn rejects_unknown_sort_order() {
        let e = with_sort("amount sideways").to_query().unwrap_err();

        assert_eq!(e.code, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Malformed sort query.");
    }

    #[test]
    fn rejects_injection_in_sort() {
        assert!(with_sort("amount; DROP TABLE users").to_query().is_err());
        assert!(with_sort("amount; DROP TABLE users").validate().is_err());
    }

    #[test]
    fn validates_page_and_size() {
        let dto = GetTransactionsFilterDto {
            page: Some(0),
            size: Some(101),
            ..Default::default()
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("page"));
        assert!(fields.contains_key("size"));

        let dto = GetTransactionsFilterDto {
            page: Some(2),
            size: Some(100),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
