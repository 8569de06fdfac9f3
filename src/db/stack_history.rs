use crate::models::StackHistory;
use sqlx::PgExecutor;
use tracing::Instrument;
use uuid::Uuid;

/// Name of the unique (stack_id, version) constraint racing updates trip over.
pub const VERSION_CONSTRAINT: &str = "stack_history_stack_version_key";

/// Max existing version + 1, or 1 for a stack without history.
pub async fn next_version<'e, E>(executor: E, stack_id: Uuid) -> Result<i32, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        SELECT COALESCE(MAX(version), 0) + 1
        FROM stack_history
        WHERE stack_id = $1
        "#,
    )
    .bind(stack_id)
    .fetch_one(executor)
    .await
}

/// Append only. A duplicate version surfaces as a unique violation on
/// [`VERSION_CONSTRAINT`].
pub async fn insert<'e, E>(executor: E, history: &StackHistory) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!(
        "Appending stack history",
        stack_id = %history.stack_id,
        version = history.version
    );
    sqlx::query(
        r#"
        INSERT INTO stack_history (id, stack_id, version, name, description, stack_type,
                                   technologies_json, created_at, modified_by_user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(history.id)
    .bind(history.stack_id)
    .bind(history.version)
    .bind(&history.name)
    .bind(&history.description)
    .bind(history.stack_type)
    .bind(&history.technologies_json)
    .bind(history.created_at)
    .bind(&history.modified_by_user_id)
    .execute(executor)
    .instrument(query_span)
    .await
    .map(|_| ())
}

pub async fn fetch_by_stack<'e, E>(executor: E, stack_id: Uuid) -> Result<Vec<StackHistory>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch stack history", stack_id = %stack_id);
    sqlx::query_as::<_, StackHistory>(
        r#"
        SELECT *
        FROM stack_history
        WHERE stack_id = $1
        ORDER BY version DESC
        "#,
    )
    .bind(stack_id)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch stack history: {:?}", err);
        err
    })
}
