pub mod health_checks;
pub(crate) mod stack;
pub(crate) mod technology;

pub use health_checks::*;

use crate::helpers::JsonResponse;
use crate::models;
use crate::services::Caller;
use actix_web::{web, Error};
use std::sync::Arc;

/// Caller as attached by the authentication middleware.
pub(crate) fn caller(user: &Option<web::ReqData<Arc<models::User>>>) -> Caller {
    Caller::from(user.as_deref())
}

/// Same as [`caller`] but rejects anonymous requests with 401.
pub(crate) fn authenticated(user: &Option<web::ReqData<Arc<models::User>>>) -> Result<Caller, Error> {
    match caller(user) {
        Caller::Anonymous => Err(JsonResponse::<()>::build().unauthorized("Authentication required")),
        caller => Ok(caller),
    }
}
