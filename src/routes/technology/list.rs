use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::TechnologyCatalog;
use crate::views::{technology::TechnologyItem, Page};
use actix_web::{get, web, Responder, Result};
use serde_valid::Validate;

#[tracing::instrument(name = "List technologies.", skip(catalog))]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::technology::ListTechnologies>,
    catalog: web::Data<TechnologyCatalog>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    query
        .validate()
        .map_err(|err| JsonResponse::<()>::build().form_error(err.to_string()))?;

    let page = catalog
        .list(
            query.page,
            query.page_size,
            query.search.as_deref(),
            query.only_pre_registered,
        )
        .await?;

    Ok(JsonResponse::<Page<TechnologyItem>>::build()
        .set_item(page)
        .ok("OK"))
}
