use crate::forms;
use crate::helpers::{self, JsonResponse};
use crate::services::TechnologySuggestionService;
use crate::views::technology::Suggestion;
use actix_web::{post, web, Responder, Result};

#[tracing::instrument(name = "Suggest technologies.", skip(body, suggestions))]
#[post("/suggest")]
pub async fn suggest_handler(
    body: web::Bytes,
    suggestions: web::Data<TechnologySuggestionService>,
) -> Result<impl Responder> {
    let form: forms::technology::SuggestTechnologies = helpers::body_into_form(&body)?;

    let list = suggestions.suggest(&form.name, form.max_results).await?;

    Ok(JsonResponse::<Suggestion>::build().set_list(list).ok("OK"))
}
