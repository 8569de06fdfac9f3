use crate::db;
use crate::models::{Stack, StackType, Technology};
use crate::services::{Caller, Result, ServiceError, TechnologyCatalog, VersionHistoryStore};
use crate::views::stack::StackDetails;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use std::future::Future;
use uuid::Uuid;

/// Fields shared by create and update. Update overwrites all of them.
#[derive(Debug, Clone)]
pub struct StackDraft {
    pub name: String,
    pub description: String,
    pub stack_type: StackType,
    pub is_public: bool,
}

impl StackDraft {
    fn normalized(&self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationFailed("Stack name is required".to_string()));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "Stack description is required".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            stack_type: self.stack_type,
            is_public: self.is_public,
        })
    }
}

/// Writes to stacks. Each call is one transaction; updates record the previous
/// state in the version history before anything is overwritten.
#[derive(Clone)]
pub struct StackMutationPipeline {
    pool: PgPool,
}

impl StackMutationPipeline {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Technologies may be referenced by id, by name, or both. Unknown ids fail
    /// the call, unknown names are added to the catalog.
    #[tracing::instrument(name = "Create stack.", skip(self, draft, technology_names))]
    pub async fn create(
        &self,
        caller: &Caller,
        draft: &StackDraft,
        technology_ids: &[Uuid],
        technology_names: &[String],
    ) -> Result<StackDetails> {
        let owner = authenticated(caller)?;
        let draft = draft.normalized()?;
        if technology_ids.is_empty() && technology_names.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "At least one technology is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let mut resolved = resolve_ids(&mut *tx, technology_ids).await?;
        for name in technology_names {
            let id = TechnologyCatalog::create_or_get_in(&mut *tx, name, None).await?;
            if !resolved.contains(&id) {
                resolved.push(id);
            }
        }

        let stack = Stack::new(
            owner.to_string(),
            draft.name,
            draft.description,
            draft.stack_type,
            draft.is_public,
        );
        db::stack::insert(&mut *tx, &stack).await?;
        db::stack_technology::link(&mut *tx, stack.id, &resolved).await?;
        let technologies = db::stack_technology::fetch_by_stack(&mut *tx, stack.id).await?;

        tx.commit().await?;
        tracing::info!("Stack {} created with {} technologies", stack.id, technologies.len());

        Ok(StackDetails::new(stack, &technologies))
    }

    /// Full replace by the owner. A lost race on the history version is
    /// retried once and then reported as a conflict.
    #[tracing::instrument(name = "Update stack.", skip(self, draft))]
    pub async fn update(
        &self,
        caller: &Caller,
        stack_id: Uuid,
        draft: &StackDraft,
        technology_ids: &[Uuid],
    ) -> Result<StackDetails> {
        let draft = draft.normalized()?;
        if technology_ids.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "At least one technology is required".to_string(),
            ));
        }

        let draft = &draft;
        retry_on_version_race(stack_id, move || {
            self.try_update(caller, stack_id, draft, technology_ids)
        })
        .await
    }

    async fn try_update(
        &self,
        caller: &Caller,
        stack_id: Uuid,
        draft: &StackDraft,
        technology_ids: &[Uuid],
    ) -> Result<StackDetails> {
        let mut tx = self.pool.begin().await?;

        let mut stack = fetch_owned(&mut *tx, caller, stack_id).await?;
        let resolved = resolve_ids(&mut *tx, technology_ids).await?;

        let previous = db::stack_technology::fetch_by_stack(&mut *tx, stack.id).await?;
        let modified_by = authenticated(caller)?;
        VersionHistoryStore::append(&mut *tx, &stack, &previous, modified_by).await?;

        stack.name = draft.name.clone();
        stack.description = draft.description.clone();
        stack.stack_type = draft.stack_type;
        stack.is_public = draft.is_public;
        stack.updated_at = Utc::now();
        let stack = db::stack::update(&mut *tx, &stack).await?;

        db::stack_technology::unlink_all(&mut *tx, stack.id).await?;
        db::stack_technology::link(&mut *tx, stack.id, &resolved).await?;
        let technologies = db::stack_technology::fetch_by_stack(&mut *tx, stack.id).await?;

        tx.commit().await?;
        Ok(StackDetails::new(stack, &technologies))
    }

    /// Soft delete by the owner. History and links stay.
    #[tracing::instrument(name = "Delete stack.", skip(self))]
    pub async fn delete(&self, caller: &Caller, stack_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        fetch_owned(&mut *tx, caller, stack_id).await?;
        db::stack::soft_delete(&mut *tx, stack_id).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Runs `attempt` again when it lost the race for the next history version.
/// A second loss is reported as a conflict.
async fn retry_on_version_race<T, F, Fut>(stack_id: Uuid, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match attempt().await {
        Err(err) if err.is_unique_violation_on(db::stack_history::VERSION_CONSTRAINT) => {
            tracing::warn!("History version race on stack {}, retrying", stack_id);
            attempt().await.map_err(|err| {
                if err.is_unique_violation_on(db::stack_history::VERSION_CONSTRAINT) {
                    ServiceError::Conflict(format!("Stack {stack_id} was modified concurrently"))
                } else {
                    err
                }
            })
        }
        other => other,
    }
}

fn authenticated(caller: &Caller) -> Result<&str> {
    caller
        .user_id()
        .ok_or_else(|| ServiceError::Forbidden("Authentication required".to_string()))
}

/// Locks the stack row for the rest of the transaction.
async fn fetch_owned(conn: &mut PgConnection, caller: &Caller, stack_id: Uuid) -> Result<Stack> {
    let user_id = authenticated(caller)?;
    let stack = db::stack::fetch_for_update(&mut *conn, stack_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Stack {stack_id} not found")))?;

    if !stack.is_owned_by(user_id) {
        return Err(ServiceError::Forbidden(format!(
            "Stack {stack_id} belongs to another user"
        )));
    }
    Ok(stack)
}

/// Distinct ids in request order; every one must be an active technology.
async fn resolve_ids(conn: &mut PgConnection, ids: &[Uuid]) -> Result<Vec<Uuid>> {
    let mut unique: Vec<Uuid> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    if unique.is_empty() {
        return Ok(unique);
    }

    let found = db::technology::fetch_active_by_ids(&mut *conn, &unique).await?;
    let missing = missing_ids(&unique, &found);
    if !missing.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "Technologies not found: {}",
            missing
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(unique)
}

fn missing_ids(requested: &[Uuid], found: &[Technology]) -> Vec<Uuid> {
    requested
        .iter()
        .filter(|id| !found.iter().any(|technology| technology.id == **id))
        .copied()
        .collect()
}
