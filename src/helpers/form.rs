use crate::helpers::JsonResponse;
use actix_web::{web::Bytes, Error};
use serde::de::DeserializeOwned;
use serde_valid::Validate;

/// Deserializes a request body, reporting the failing field path, then runs
/// the form's validation rules.
pub fn body_into_form<T>(body: &Bytes) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    let form: T = serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let msg = format!("{}: {}", err.path(), err.inner());
        JsonResponse::<()>::build().bad_request(msg)
    })?;

    if let Err(errors) = form.validate() {
        let errors = errors.to_string();
        tracing::debug!("Invalid data received {:?}", &errors);
        return Err(JsonResponse::<()>::build().form_error(errors));
    }

    Ok(form)
}
