use crate::models::user::User as UserModel;
use serde_derive::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Body returned by the auth service for a bearer token.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub user: User,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email_confirmed: bool,
}

impl TryFrom<UserForm> for UserModel {
    type Error = String;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        if form.user.id.trim().is_empty() {
            return Err("user id is missing".to_string());
        }

        Ok(UserModel {
            id: form.user.id,
            first_name: form.user.first_name,
            last_name: form.user.last_name,
            email: form.user.email,
            role: form.user.role,
            email_confirmed: form.user.email_confirmed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_parses() {
        let form: UserForm = serde_json::from_value(serde_json::json!({
            "user": {
                "_id": "u-42",
                "first_name": "Ada",
                "email": "ada@example.com",
                "role": "group_admin",
                "email_confirmed": true,
                "plan": {"name": "free"}
            }
        }))
        .unwrap();

        let user = UserModel::try_from(form).unwrap();
        assert_eq!(user.id, "u-42");
        assert_eq!(user.role, "group_admin");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn test_blank_id_is_rejected() {
        assert!(UserModel::try_from(UserForm::default()).is_err());
    }
}
