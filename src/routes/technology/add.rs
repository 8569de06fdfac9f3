use crate::configuration::Settings;
use crate::forms;
use crate::helpers::{self, JsonResponse};
use crate::models;
use crate::routes;
use crate::services::TechnologyCatalog;
use crate::views::technology::TechnologyItem;
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

/// Admin path, adds a curated technology to the catalog.
#[tracing::instrument(name = "Add pre-registered technology.", skip(body, catalog, settings))]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    body: web::Bytes,
    catalog: web::Data<TechnologyCatalog>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let caller = routes::authenticated(&user)?;
    if !caller.has_role(&settings.admin_role) {
        return Err(JsonResponse::<()>::build().forbidden("Admin role required"));
    }

    let form: forms::technology::CreateTechnology = helpers::body_into_form(&body)?;
    let technology = catalog
        .create_pre_registered(&form.name, form.description.as_deref())
        .await?;

    Ok(JsonResponse::<TechnologyItem>::build()
        .set_id(technology.id)
        .set_item(technology.into())
        .created("Created"))
}
