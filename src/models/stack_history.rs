use crate::models::{StackType, Technology};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable pre-update copy of a stack. Rows are only ever inserted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StackHistory {
    pub id: Uuid,
    pub stack_id: Uuid,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub stack_type: StackType,
    pub technologies_json: String,
    pub created_at: DateTime<Utc>,
    pub modified_by_user_id: String,
}

/// Point-in-time copy of a linked technology, decoupled from the live row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologySnapshot {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Technology> for TechnologySnapshot {
    fn from(technology: &Technology) -> Self {
        Self {
            id: technology.id,
            name: technology.name.clone(),
            description: technology.description.clone(),
        }
    }
}

pub fn encode_snapshot(technologies: &[TechnologySnapshot]) -> Result<String, serde_json::Error> {
    serde_json::to_string(technologies)
}

/// A malformed snapshot degrades to an empty list for that row only.
pub fn decode_snapshot(raw: &str) -> Vec<TechnologySnapshot> {
    if raw.trim().is_empty() {
        return vec![];
    }

    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!("Malformed technology snapshot: {:?}", err);
        vec![]
    })
}

impl StackHistory {
    pub fn technologies(&self) -> Vec<TechnologySnapshot> {
        decode_snapshot(&self.technologies_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> TechnologySnapshot {
        TechnologySnapshot {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(format!("{name} description")),
        }
    }

    #[test]
    fn test_snapshot_keeps_order() {
        let technologies = vec![snapshot("Angular"), snapshot("Docker"), snapshot("Rust")];
        let raw = encode_snapshot(&technologies).unwrap();

        assert_eq!(decode_snapshot(&raw), technologies);
    }

    #[test]
    fn test_malformed_snapshot_is_empty() {
        assert!(decode_snapshot("{not json").is_empty());
        assert!(decode_snapshot("[{\"id\":\"nope\",\"name\":\"x\"}]").is_empty());
        assert!(decode_snapshot("").is_empty());
    }

    #[test]
    fn test_missing_description_is_none() {
        let id = Uuid::new_v4();
        let raw = format!("[{{\"id\":\"{id}\",\"name\":\"Vuex\"}}]");
        let decoded = decode_snapshot(&raw);

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, id);
        assert_eq!(decoded[0].description, None);
    }
}
