use crate::db;
use crate::models::Technology;
use crate::services::{Result, ServiceError};
use crate::views::{technology::TechnologyItem, Page};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Canonical technology registry. A name maps to exactly one row whatever its
/// case or active state; soft-deleted rows come back instead of being duplicated.
#[derive(Clone)]
pub struct TechnologyCatalog {
    pool: PgPool,
}

impl TechnologyCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Id of the technology with this name, creating a user-submitted entry if
    /// there is none. Runs in its own transaction.
    pub async fn create_or_get(&self, name: &str, description: Option<&str>) -> Result<Uuid> {
        let mut tx = self.pool.begin().await.map_err(|err| {
            tracing::error!("Failed to start transaction: {:?}", err);
            err
        })?;
        let id = Self::create_or_get_in(&mut *tx, name, description).await?;
        tx.commit().await.map_err(|err| {
            tracing::error!("Failed to commit transaction: {:?}", err);
            err
        })?;

        Ok(id)
    }

    /// Same as [`Self::create_or_get`] inside a transaction the caller owns.
    #[tracing::instrument(name = "Create or get technology.", skip(conn, description))]
    pub async fn create_or_get_in(
        conn: &mut PgConnection,
        name: &str,
        description: Option<&str>,
    ) -> Result<Uuid> {
        let name = normalize_name(name)?;

        if let Some(existing) = db::technology::fetch_by_name(&mut *conn, &name).await? {
            return Self::revive(conn, existing).await;
        }

        let technology = Technology::new(name.clone(), trimmed(description), false);
        if let Some(created) = db::technology::insert_if_absent(&mut *conn, &technology).await? {
            tracing::info!("Technology {} created with id {}", created.name, created.id);
            return Ok(created.id);
        }

        // lost the insert race, the winner's row is visible now
        let existing = db::technology::fetch_by_name(&mut *conn, &name)
            .await?
            .ok_or_else(|| ServiceError::Conflict(format!("Technology {name} is being created")))?;
        Self::revive(conn, existing).await
    }

    async fn revive(conn: &mut PgConnection, mut technology: Technology) -> Result<Uuid> {
        if !technology.is_active {
            tracing::info!("Reactivating technology {}", technology.id);
            technology.reactivate();
            db::technology::update(&mut *conn, &technology).await?;
        }
        Ok(technology.id)
    }

    /// Admin path. An active entry with the same name is an error, an inactive
    /// one is reactivated and promoted to pre-registered.
    #[tracing::instrument(name = "Create pre-registered technology.", skip(self, description))]
    pub async fn create_pre_registered(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Technology> {
        let name = normalize_name(name)?;
        let description = trimmed(description);
        let mut tx = self.pool.begin().await?;

        let technology = match db::technology::fetch_by_name(&mut *tx, &name).await? {
            Some(existing) if existing.is_active => {
                return Err(ServiceError::AlreadyExists(format!(
                    "Technology {} already exists",
                    existing.name
                )));
            }
            Some(mut existing) => {
                existing.reactivate();
                existing.is_pre_registered = true;
                if description.is_some() {
                    existing.description = description;
                }
                db::technology::update(&mut *tx, &existing).await?
            }
            None => {
                let technology = Technology::new(name.clone(), description, true);
                db::technology::insert_if_absent(&mut *tx, &technology)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::AlreadyExists(format!("Technology {name} already exists"))
                    })?
            }
        };

        tx.commit().await?;
        Ok(technology)
    }

    /// Active technologies by name, optionally filtered.
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
        only_pre_registered: Option<bool>,
    ) -> Result<Page<TechnologyItem>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let offset = Page::<TechnologyItem>::offset(page, page_size)
            .ok_or_else(|| ServiceError::ValidationFailed("Page is out of range".to_string()))?;

        let total_count =
            db::technology::count_active(&self.pool, search, only_pre_registered).await?;
        let items = db::technology::list_active(
            &self.pool,
            search,
            only_pre_registered,
            page_size,
            offset,
        )
        .await?
        .into_iter()
        .map(TechnologyItem::from)
        .collect();

        Ok(Page::new(items, total_count, page, page_size))
    }
}

fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::ValidationFailed(
            "Technology name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed() {
        assert_eq!(normalize_name("  Vuex ").unwrap(), "Vuex");
        assert!(matches!(
            normalize_name("   "),
            Err(ServiceError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_blank_description_is_none() {
        assert_eq!(trimmed(Some("  ")), None);
        assert_eq!(trimmed(Some(" State ")), Some("State".to_string()));
        assert_eq!(trimmed(None), None);
    }
}
