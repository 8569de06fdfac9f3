use crate::forms;
use crate::helpers::{self, JsonResponse};
use crate::models;
use crate::routes;
use crate::services::StackMutationPipeline;
use crate::views::stack::StackDetails;
use actix_web::{post, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Add stack.", skip(body, pipeline))]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    body: web::Bytes,
    pipeline: web::Data<StackMutationPipeline>,
) -> Result<impl Responder> {
    let caller = routes::authenticated(&user)?;
    let form: forms::stack::CreateStack = helpers::body_into_form(&body)?;
    let (draft, technology_ids, technology_names) = form.into_parts()?;

    let stack = pipeline
        .create(&caller, &draft, &technology_ids, &technology_names)
        .await?;

    Ok(JsonResponse::<StackDetails>::build()
        .set_id(stack.id)
        .set_item(stack)
        .created("Created"))
}
