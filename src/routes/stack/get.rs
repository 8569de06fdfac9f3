use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes;
use crate::services::{StackListing, StackQuery};
use crate::views::stack::{StackDetails, StackSummary};
use crate::views::Page;
use actix_web::{get, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Get stack.", skip(stacks))]
#[get("/{id}")]
pub async fn item_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    stacks: web::Data<StackQuery>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let stack = stacks.get(&routes::caller(&user), id).await?;

    Ok(JsonResponse::<StackDetails>::build().set_item(stack).ok("OK"))
}

#[tracing::instrument(name = "List stacks.", skip(stacks))]
#[get("")]
pub async fn list_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    query: web::Query<forms::stack::ListStacks>,
    stacks: web::Data<StackQuery>,
) -> Result<impl Responder> {
    let query = query.into_inner();
    query
        .validate()
        .map_err(|err| JsonResponse::<()>::build().form_error(err.to_string()))?;

    let listing = StackListing::from(query);
    let page = stacks.list(&routes::caller(&user), &listing).await?;

    Ok(JsonResponse::<Page<StackSummary>>::build()
        .set_item(page)
        .ok("OK"))
}
