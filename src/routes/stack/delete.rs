use crate::helpers::JsonResponse;
use crate::models;
use crate::routes;
use crate::services::StackMutationPipeline;
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Delete stack.", skip(pipeline))]
#[delete("/{id}")]
pub async fn delete_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    pipeline: web::Data<StackMutationPipeline>,
) -> Result<impl Responder> {
    let caller = routes::authenticated(&user)?;
    let (id,) = path.into_inner();

    pipeline.delete(&caller, id).await?;

    Ok(JsonResponse::<()>::build().set_id(id).ok("Deleted"))
}
