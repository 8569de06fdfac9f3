use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct TechnologyItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_pre_registered: bool,
    pub created_at: DateTime<Utc>,
}

impl From<models::Technology> for TechnologyItem {
    fn from(technology: models::Technology) -> Self {
        Self {
            id: technology.id,
            name: technology.name,
            description: technology.description,
            is_pre_registered: technology.is_pre_registered,
            created_at: technology.created_at,
        }
    }
}

/// Ranked autocomplete entry, score in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub score: u8,
}

impl Suggestion {
    pub fn new(technology: models::Technology, score: u8) -> Self {
        Self {
            id: technology.id,
            name: technology.name,
            description: technology.description,
            score,
        }
    }
}
