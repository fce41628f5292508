pub mod db;
pub mod sqlx;
pub mod time;
