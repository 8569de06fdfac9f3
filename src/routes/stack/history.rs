use crate::helpers::JsonResponse;
use crate::models;
use crate::routes;
use crate::services::VersionHistoryStore;
use crate::views::stack_history::HistoryEntry;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Get stack history.", skip(history))]
#[get("/{id}/history")]
pub async fn history_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(Uuid,)>,
    history: web::Data<VersionHistoryStore>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let entries = history.get_history(&routes::caller(&user), id).await?;

    Ok(JsonResponse::<HistoryEntry>::build().set_list(entries).ok("OK"))
}
