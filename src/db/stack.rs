use crate::models::{Stack, StackType};
use sqlx::PgExecutor;
use tracing::Instrument;
use uuid::Uuid;

/// Listing filter. `viewer` widens visibility to that user's private stacks.
#[derive(Debug, Default, Clone)]
pub struct StackFilter {
    pub viewer: Option<String>,
    pub stack_type: Option<StackType>,
    pub technology_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Active stack by id; soft-deleted rows are invisible here.
pub async fn fetch<'e, E>(executor: E, id: Uuid) -> Result<Option<Stack>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    tracing::info!("Fetch stack {}", id);
    sqlx::query_as::<_, Stack>(
        r#"
        SELECT *
        FROM stack
        WHERE id=$1 AND is_active
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch stack, error: {:?}", err);
        err
    })
}

/// Same as [`fetch`] but holds the row lock until the transaction ends, so
/// concurrent writers to one stack run one after another.
pub async fn fetch_for_update<'e, E>(executor: E, id: Uuid) -> Result<Option<Stack>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    tracing::info!("Lock stack {}", id);
    sqlx::query_as::<_, Stack>(
        r#"
        SELECT *
        FROM stack
        WHERE id=$1 AND is_active
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|err| {
        tracing::error!("Failed to lock stack, error: {:?}", err);
        err
    })
}

pub async fn insert<'e, E>(executor: E, stack: &Stack) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Saving new stack into the database");
    sqlx::query(
        r#"
        INSERT INTO stack (id, name, description, stack_type, is_public, is_active, owner_user_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(stack.id)
    .bind(&stack.name)
    .bind(&stack.description)
    .bind(stack.stack_type)
    .bind(stack.is_public)
    .bind(stack.is_active)
    .bind(&stack.owner_user_id)
    .bind(stack.created_at)
    .bind(stack.updated_at)
    .execute(executor)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to insert stack: {:?}", err);
        err
    })
}

/// Full overwrite of the mutable fields.
pub async fn update<'e, E>(executor: E, stack: &Stack) -> Result<Stack, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Updating stack", id = %stack.id);
    sqlx::query_as::<_, Stack>(
        r#"
        UPDATE stack
        SET
            name=$2,
            description=$3,
            stack_type=$4,
            is_public=$5,
            updated_at=$6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(stack.id)
    .bind(&stack.name)
    .bind(&stack.description)
    .bind(stack.stack_type)
    .bind(stack.is_public)
    .bind(stack.updated_at)
    .fetch_one(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update stack: {:?}", err);
        err
    })
}

#[tracing::instrument(name = "Soft delete stack.", skip(executor))]
pub async fn soft_delete<'e, E>(executor: E, id: Uuid) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE stack
        SET is_active = FALSE, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to soft delete stack: {:?}", err);
        err
    })
}

const LIST_FILTER: &str = r#"
    FROM stack s
    WHERE s.is_active
      AND (s.is_public OR ($1::text IS NOT NULL AND s.owner_user_id = $1))
      AND ($2::varchar IS NULL OR s.stack_type = $2)
      AND ($3::uuid IS NULL OR EXISTS (
            SELECT 1 FROM stack_technology st
            WHERE st.stack_id = s.id AND st.technology_id = $3))
      AND ($4::text IS NULL
           OR strpos(lower(s.name), lower($4)) > 0
           OR strpos(lower(s.description), lower($4)) > 0
           OR EXISTS (
                SELECT 1 FROM stack_technology st
                INNER JOIN technology t ON t.id = st.technology_id
                WHERE st.stack_id = s.id AND strpos(lower(t.name), lower($4)) > 0))
"#;

pub async fn list<'e, E>(
    executor: E,
    filter: &StackFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Stack>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("SELECT s.* {LIST_FILTER} ORDER BY s.updated_at DESC LIMIT $5 OFFSET $6");
    let query_span = tracing::info_span!("List visible stacks.");
    sqlx::query_as::<_, Stack>(&query)
        .bind(filter.viewer.as_deref())
        .bind(filter.stack_type)
        .bind(filter.technology_id)
        .bind(filter.search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list stacks, error: {:?}", err);
            err
        })
}

pub async fn count<'e, E>(executor: E, filter: &StackFilter) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("SELECT COUNT(*) {LIST_FILTER}");
    let query_span = tracing::info_span!("Count visible stacks.");
    sqlx::query_scalar::<_, i64>(&query)
        .bind(filter.viewer.as_deref())
        .bind(filter.stack_type)
        .bind(filter.technology_id)
        .bind(filter.search.as_deref())
        .fetch_one(executor)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count stacks, error: {:?}", err);
            err
        })
}
