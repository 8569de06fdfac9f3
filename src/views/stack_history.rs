use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub stack_id: Uuid,
    pub version: i32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub stack_type: models::StackType,
    pub technologies: Vec<models::TechnologySnapshot>,
    pub created_at: DateTime<Utc>,
    pub modified_by_user_id: String,
}

impl From<models::StackHistory> for HistoryEntry {
    fn from(history: models::StackHistory) -> Self {
        // parsed per row, a broken snapshot only empties this entry
        let technologies = history.technologies();
        Self {
            id: history.id,
            stack_id: history.stack_id,
            version: history.version,
            name: history.name,
            description: history.description,
            stack_type: history.stack_type,
            technologies,
            created_at: history.created_at,
            modified_by_user_id: history.modified_by_user_id,
        }
    }
}
