use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "lowercase", type_name = "varchar")]
#[serde(rename_all = "lowercase")]
pub enum StackType {
    Frontend,
    Backend,
    Mobile,
    DevOps,
    Data,
    Testing,
}

impl std::fmt::Display for StackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackType::Frontend => write!(f, "frontend"),
            StackType::Backend => write!(f, "backend"),
            StackType::Mobile => write!(f, "mobile"),
            StackType::DevOps => write!(f, "devops"),
            StackType::Data => write!(f, "data"),
            StackType::Testing => write!(f, "testing"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Stack {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub stack_type: StackType,
    pub is_public: bool,
    pub is_active: bool, // soft-delete flag
    pub owner_user_id: String, // external unique identifier for the user
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stack {
    pub fn new(
        owner_user_id: String,
        name: String,
        description: String,
        stack_type: StackType,
        is_public: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            stack_type,
            is_public,
            is_active: true,
            owner_user_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_type_serde_is_lowercase() {
        let value = serde_json::to_value(StackType::DevOps).unwrap();
        assert_eq!(value, serde_json::json!("devops"));

        let parsed: StackType = serde_json::from_str("\"frontend\"").unwrap();
        assert_eq!(parsed, StackType::Frontend);
        assert!(serde_json::from_str::<StackType>("\"desktop\"").is_err());
    }

    #[test]
    fn test_stack_type_display_matches_storage() {
        assert_eq!(StackType::DevOps.to_string(), "devops");
        assert_eq!(StackType::Testing.to_string(), "testing");
    }

    #[test]
    fn test_owner_check() {
        let stack = Stack::new(
            "user-1".to_string(),
            "Web".to_string(),
            "desc".to_string(),
            StackType::Frontend,
            true,
        );
        assert!(stack.is_owned_by("user-1"));
        assert!(!stack.is_owned_by("user-2"));
        assert!(stack.is_active);
    }
}
