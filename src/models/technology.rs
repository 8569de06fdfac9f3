use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical catalog entry. `name` is unique case-insensitively across active
/// and inactive rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Technology {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_pre_registered: bool, // admin-curated vs. user-submitted
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Technology {
    pub fn new(name: String, description: Option<String>, is_pre_registered: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            is_active: true,
            is_pre_registered,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bring a soft-deleted entry back instead of inserting a duplicate.
    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_technology_is_active() {
        let technology = Technology::new("Vuex".to_string(), None, false);
        assert!(technology.is_active);
        assert!(!technology.is_pre_registered);
        assert_eq!(technology.created_at, technology.updated_at);
    }

    #[test]
    fn test_reactivate_keeps_identity() {
        let mut technology = Technology::new("Vuex".to_string(), None, false);
        let id = technology.id;
        technology.is_active = false;

        technology.reactivate();

        assert!(technology.is_active);
        assert_eq!(technology.id, id);
        assert!(technology.updated_at >= technology.created_at);
    }
}
