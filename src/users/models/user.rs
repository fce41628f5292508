use crate::app::util::time;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub nickname: String,
    pub email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    pub fn new(user_id: &str, nickname: &str, email: Option<&str>) -> Self {
        let current_time = time::current_time_in_secs() as i64;

        Self {
            user_id: user_id.to_string(),
            nickname: nickname.to_string(),
            email: email.map(|e| e.to_lowercase()),
            created_at: current_time,
            updated_at: current_time,
        }
    }
}
