use serde::Deserialize;

/// Caller resolved by the external auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub email_confirmed: bool,
}
