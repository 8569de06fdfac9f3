use crate::models::Technology;
use sqlx::PgExecutor;
use tracing::Instrument;
use uuid::Uuid;

/// Case-insensitive exact-name lookup across active and inactive rows.
pub async fn fetch_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch technology by name.", name = %name);
    sqlx::query_as::<_, Technology>(
        r#"
        SELECT *
        FROM technology
        WHERE lower(name) = lower($1)
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch technology by name, error: {:?}", err);
        err
    })
}

/// Inserts the row unless the name is already taken. `None` means a
/// concurrent writer won the race.
pub async fn insert_if_absent<'e, E>(
    executor: E,
    technology: &Technology,
) -> Result<Option<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Saving new technology into the database");
    sqlx::query_as::<_, Technology>(
        r#"
        INSERT INTO technology (id, name, description, is_active, is_pre_registered, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT DO NOTHING
        RETURNING *
        "#,
    )
    .bind(technology.id)
    .bind(&technology.name)
    .bind(&technology.description)
    .bind(technology.is_active)
    .bind(technology.is_pre_registered)
    .bind(technology.created_at)
    .bind(technology.updated_at)
    .fetch_optional(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert technology: {:?}", err);
        err
    })
}

pub async fn update<'e, E>(executor: E, technology: &Technology) -> Result<Technology, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Updating technology", id = %technology.id);
    sqlx::query_as::<_, Technology>(
        r#"
        UPDATE technology
        SET
            description=$2,
            is_active=$3,
            is_pre_registered=$4,
            updated_at=$5
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(technology.id)
    .bind(&technology.description)
    .bind(technology.is_active)
    .bind(technology.is_pre_registered)
    .bind(technology.updated_at)
    .fetch_one(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update technology: {:?}", err);
        err
    })
}

pub async fn fetch_active_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<Vec<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch active technologies by ids.", count = ids.len());
    sqlx::query_as::<_, Technology>(
        r#"
        SELECT *
        FROM technology
        WHERE id = ANY($1) AND is_active
        ORDER BY name ASC
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch technologies by ids, error: {:?}", err);
        err
    })
}

const LIST_FILTER: &str = r#"
    FROM technology
    WHERE is_active
      AND ($1::text IS NULL
           OR strpos(lower(name), lower($1)) > 0
           OR strpos(lower(coalesce(description, '')), lower($1)) > 0)
      AND ($2::bool IS NULL OR is_pre_registered = $2)
"#;

pub async fn list_active<'e, E>(
    executor: E,
    search: Option<&str>,
    only_pre_registered: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("SELECT * {LIST_FILTER} ORDER BY name ASC LIMIT $3 OFFSET $4");
    let query_span = tracing::info_span!("List active technologies.");
    sqlx::query_as::<_, Technology>(&query)
        .bind(search)
        .bind(only_pre_registered)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list technologies, error: {:?}", err);
            err
        })
}

pub async fn count_active<'e, E>(
    executor: E,
    search: Option<&str>,
    only_pre_registered: Option<bool>,
) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!("SELECT COUNT(*) {LIST_FILTER}");
    let query_span = tracing::info_span!("Count active technologies.");
    sqlx::query_scalar::<_, i64>(&query)
        .bind(search)
        .bind(only_pre_registered)
        .fetch_one(executor)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count technologies, error: {:?}", err);
            err
        })
}

/// Active technologies whose name contains the query or is contained in it.
pub async fn fetch_containing<'e, E>(executor: E, query: &str, limit: i64) -> Result<Vec<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch suggestion candidates.", query = %query);
    sqlx::query_as::<_, Technology>(
        r#"
        SELECT *
        FROM technology
        WHERE is_active
          AND (strpos(lower(name), lower($1)) > 0 OR strpos(lower($1), lower(name)) > 0)
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(query)
    .bind(limit)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch suggestion candidates, error: {:?}", err);
        err
    })
}

pub async fn fetch_active_excluding<'e, E>(
    executor: E,
    exclude: &[Uuid],
    limit: i64,
) -> Result<Vec<Technology>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query_span = tracing::info_span!("Fetch additional suggestion candidates.");
    sqlx::query_as::<_, Technology>(
        r#"
        SELECT *
        FROM technology
        WHERE is_active AND NOT (id = ANY($1))
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(exclude)
    .bind(limit)
    .fetch_all(executor)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch additional candidates, error: {:?}", err);
        err
    })
}
