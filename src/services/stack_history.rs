use crate::db;
use crate::models::{self, Stack, StackHistory, Technology, TechnologySnapshot};
use crate::services::{Caller, Result, ServiceError};
use crate::views::stack_history::HistoryEntry;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Append-only log of pre-update stack copies.
#[derive(Clone)]
pub struct VersionHistoryStore {
    pool: PgPool,
}

impl VersionHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records `stack` and `technologies` as they are now under the next free
    /// version. Must run inside the transaction that goes on to change the stack.
    pub async fn append(
        conn: &mut PgConnection,
        stack: &Stack,
        technologies: &[Technology],
        modified_by: &str,
    ) -> Result<StackHistory> {
        let version = db::stack_history::next_version(&mut *conn, stack.id).await?;
        let history = snapshot(stack, technologies, version, modified_by)?;
        db::stack_history::insert(&mut *conn, &history).await?;

        tracing::info!("Stack {} history version {} recorded", stack.id, version);
        Ok(history)
    }

    /// Newest first. Readable by anyone for public stacks, by the owner otherwise.
    #[tracing::instrument(name = "Get stack history.", skip(self))]
    pub async fn get_history(&self, caller: &Caller, stack_id: Uuid) -> Result<Vec<HistoryEntry>> {
        let stack = db::stack::fetch(&self.pool, stack_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Stack {stack_id} not found")))?;

        if !caller.can_read(stack.is_public, &stack.owner_user_id) {
            return Err(ServiceError::Forbidden(format!(
                "Stack {stack_id} is private"
            )));
        }

        let rows = db::stack_history::fetch_by_stack(&self.pool, stack_id).await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}

/// History row for `stack` at `version`, technologies ordered by name.
pub fn snapshot(
    stack: &Stack,
    technologies: &[Technology],
    version: i32,
    modified_by: &str,
) -> Result<StackHistory> {
    let mut technologies: Vec<TechnologySnapshot> = technologies.iter().map(Into::into).collect();
    technologies.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    Ok(StackHistory {
        id: Uuid::new_v4(),
        stack_id: stack.id,
        version,
        name: stack.name.clone(),
        description: stack.description.clone(),
        stack_type: stack.stack_type,
        technologies_json: models::encode_snapshot(&technologies)?,
        created_at: Utc::now(),
        modified_by_user_id: modified_by.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StackType;

    fn stack() -> Stack {
        Stack::new(
            "owner-1".to_string(),
            "Web".to_string(),
            "Frontend tooling".to_string(),
            StackType::Frontend,
            false,
        )
    }

    #[test]
    fn test_snapshot_copies_stack_fields() {
        let stack = stack();
        let history = snapshot(&stack, &[], 3, "owner-1").unwrap();

        assert_eq!(history.stack_id, stack.id);
        assert_eq!(history.version, 3);
        assert_eq!(history.name, "Web");
        assert_eq!(history.description, "Frontend tooling");
        assert_eq!(history.stack_type, StackType::Frontend);
        assert_eq!(history.modified_by_user_id, "owner-1");
        assert!(history.technologies().is_empty());
    }

    #[test]
    fn test_snapshot_orders_technologies_by_name() {
        let vue = Technology::new("Vue".to_string(), Some("UI".to_string()), true);
        let docker = Technology::new("Docker".to_string(), None, true);

        let history = snapshot(&stack(), &[vue.clone(), docker.clone()], 1, "owner-1").unwrap();
        let technologies = history.technologies();

        assert_eq!(
            technologies,
            vec![TechnologySnapshot::from(&docker), TechnologySnapshot::from(&vue)]
        );
    }

    #[test]
    fn test_history_entry_survives_broken_snapshot() {
        let mut history = snapshot(&stack(), &[], 1, "owner-1").unwrap();
        history.technologies_json = "[{\"broken\"".to_string();

        let entry = HistoryEntry::from(history);
        assert_eq!(entry.version, 1);
        assert!(entry.technologies.is_empty());
    }
}
