use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const SUMMARY_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct StackDetails {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub stack_type: models::StackType,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_user_id: String,
    pub technologies: Vec<models::TechnologySnapshot>,
}

impl StackDetails {
    pub fn new(stack: models::Stack, technologies: &[models::Technology]) -> Self {
        Self {
            id: stack.id,
            name: stack.name,
            description: stack.description,
            stack_type: stack.stack_type,
            is_public: stack.is_public,
            created_at: stack.created_at,
            updated_at: stack.updated_at,
            owner_user_id: stack.owner_user_id,
            technologies: technologies.iter().map(Into::into).collect(),
        }
    }
}

/// Listing row; the description is cut to keep pages small.
#[derive(Debug, Clone, Serialize)]
pub struct StackSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub stack_type: models::StackType,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_user_id: String,
    pub technologies: Vec<models::TechnologySnapshot>,
}

impl StackSummary {
    pub fn new(stack: models::Stack, technologies: Vec<models::TechnologySnapshot>) -> Self {
        Self {
            id: stack.id,
            name: stack.name,
            description: truncate_description(&stack.description),
            stack_type: stack.stack_type,
            is_public: stack.is_public,
            created_at: stack.created_at,
            updated_at: stack.updated_at,
            owner_user_id: stack.owner_user_id,
            technologies,
        }
    }
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= SUMMARY_DESCRIPTION_LEN {
        return description.to_string();
    }

    let cut: String = description.chars().take(SUMMARY_DESCRIPTION_LEN).collect();
    format!("{cut}...")
}
