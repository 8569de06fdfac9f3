use crate::models::Technology;
use chrono::Utc;
use sqlx::PgExecutor;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct LinkedTechnology {
    pub stack_id: Uuid,
    #[sqlx(flatten)]
    pub technology: Technology,
}

pub async fn link<'e, E>(executor: E, stack_id: Uuid, technology_ids: &[Uuid]) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Linking technologies to stack", stack_id = %stack_id);
    let ids: Vec<Uuid> = technology_ids.iter().map(|_| Uuid::new_v4()).collect();
    sqlx::query(
        r#"
        INSERT INTO stack_technology (id, stack_id, technology_id, created_at)
        SELECT link.id, $2, link.technology_id, $4
        FROM UNNEST($1::uuid[], $3::uuid[]) AS link(id, technology_id)
        "#,
    )
    .bind(&ids)
    .bind(stack_id)
    .bind(technology_ids)
    .bind(Utc::now())
    .execute(executor)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to link technologies: {:?}", err);
        err
    })
}

pub async fn unlink_all<'e, E>(executor: E, stack_id: Uuid) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Removing stack technologies", stack_id = %stack_id);
    sqlx::query("DELETE FROM stack_technology WHERE stack_id = $1")
        .bind(stack_id)
        .execute(executor)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to unlink technologies: {:?}", err);
            err
        })
}

/// Technologies linked to one stack, by name.
pub async fn fetch_by_stack<'e, E>(executor: E, stack_id: Uuid) -> Result<Vec<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch stack technologies", stack_id = %stack_id);
    sqlx::query_as::<_, Technology>(
        r#"
        SELECT t.*
        FROM technology t
        INNER JOIN stack_technology st ON st.technology_id = t.id
        WHERE st.stack_id = $1
        ORDER BY t.name ASC, t.id ASC
        "#,
    )
    .bind(stack_id)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch stack technologies: {:?}", err);
        err
    })
}

pub async fn fetch_by_stacks<'e, E>(
    executor: E,
    stack_ids: &[Uuid],
) -> Result<Vec<LinkedTechnology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch technologies of stacks", count = stack_ids.len());
    sqlx::query_as::<_, LinkedTechnology>(
        r#"
        SELECT st.stack_id, t.*
        FROM technology t
        INNER JOIN stack_technology st ON st.technology_id = t.id
        WHERE st.stack_id = ANY($1)
        ORDER BY t.name ASC, t.id ASC
        "#,
    )
    .bind(stack_ids)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch technologies of stacks: {:?}", err);
        err
    })
}
