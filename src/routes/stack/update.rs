use crate::forms;
use crate::helpers::{self, JsonResponse};
use crate::models;
use crate::routes;
use crate::services::StackMutationPipeline;
use crate::views::stack::StackDetails;
use actix_web::{put, web, Responder, Result};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Update stack.", skip(body, pipeline))]
#[put("/{id}")]
pub async fn update_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    body: web::Bytes,
    pipeline: web::Data<StackMutationPipeline>,
) -> Result<impl Responder> {
    let caller = routes::authenticated(&user)?;
    let (id,) = path.into_inner();
    let form: forms::stack::UpdateStack = helpers::body_into_form(&body)?;
    let (draft, technology_ids) = form.into_parts()?;

    let stack = pipeline.update(&caller, id, &draft, &technology_ids).await?;

    Ok(JsonResponse::<StackDetails>::build()
        .set_id(stack.id)
        .set_item(stack)
        .ok("Updated"))
}
