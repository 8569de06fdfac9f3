use crate::db::{self, stack::StackFilter};
use crate::models::{StackType, TechnologySnapshot};
use crate::services::{Caller, Result, ServiceError};
use crate::views::stack::{StackDetails, StackSummary};
use crate::views::Page;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct StackListing {
    pub page: i64,
    pub page_size: i64,
    pub stack_type: Option<StackType>,
    pub technology_id: Option<Uuid>,
    pub search: Option<String>,
    pub only_public: bool,
}

/// Read side for stacks, same visibility rules as history reads.
#[derive(Clone)]
pub struct StackQuery {
    pool: PgPool,
}

impl StackQuery {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Get stack.", skip(self))]
    pub async fn get(&self, caller: &Caller, stack_id: Uuid) -> Result<StackDetails> {
        let stack = db::stack::fetch(&self.pool, stack_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Stack {stack_id} not found")))?;

        if !caller.can_read(stack.is_public, &stack.owner_user_id) {
            return Err(ServiceError::Forbidden(format!("Stack {stack_id} is private")));
        }

        let technologies = db::stack_technology::fetch_by_stack(&self.pool, stack.id).await?;
        Ok(StackDetails::new(stack, &technologies))
    }

    #[tracing::instrument(name = "List stacks.", skip(self))]
    pub async fn list(&self, caller: &Caller, listing: &StackListing) -> Result<Page<StackSummary>> {
        let filter = filter_for(caller, listing);
        let offset = Page::<StackSummary>::offset(listing.page, listing.page_size)
            .ok_or_else(|| ServiceError::ValidationFailed("Page is out of range".to_string()))?;

        let total_count = db::stack::count(&self.pool, &filter).await?;
        let stacks = db::stack::list(&self.pool, &filter, listing.page_size, offset).await?;

        let ids: Vec<Uuid> = stacks.iter().map(|stack| stack.id).collect();
        let mut linked: HashMap<Uuid, Vec<TechnologySnapshot>> = HashMap::new();
        if !ids.is_empty() {
            for link in db::stack_technology::fetch_by_stacks(&self.pool, &ids).await? {
                linked
                    .entry(link.stack_id)
                    .or_default()
                    .push(TechnologySnapshot::from(&link.technology));
            }
        }

        let items = stacks
            .into_iter()
            .map(|stack| {
                let technologies = linked.remove(&stack.id).unwrap_or_default();
                StackSummary::new(stack, technologies)
            })
            .collect();

        Ok(Page::new(items, total_count, listing.page, listing.page_size))
    }
}

fn filter_for(caller: &Caller, listing: &StackListing) -> StackFilter {
    let viewer = if listing.only_public {
        None
    } else {
        caller.user_id().map(str::to_string)
    };

    StackFilter {
        viewer,
        stack_type: listing.stack_type,
        technology_id: listing.technology_id,
        search: listing
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> StackListing {
        StackListing {
            page: 1,
            page_size: 20,
            search: Some("  rust ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_owner_sees_own_private_stacks() {
        let caller = Caller::User {
            id: "u1".to_string(),
            role: "group_user".to_string(),
        };
        let filter = filter_for(&caller, &listing());

        assert_eq!(filter.viewer.as_deref(), Some("u1"));
        assert_eq!(filter.search.as_deref(), Some("rust"));
    }

    #[test]
    fn test_only_public_hides_private_stacks() {
        let caller = Caller::User {
            id: "u1".to_string(),
            role: "group_user".to_string(),
        };
        let listing = StackListing {
            only_public: true,
            ..listing()
        };

        assert_eq!(filter_for(&caller, &listing).viewer, None);
        assert_eq!(filter_for(&Caller::Anonymous, &self::listing()).viewer, None);
    }
}
