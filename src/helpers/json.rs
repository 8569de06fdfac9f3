use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde_derive::Serialize;
use uuid::Uuid;

/// Envelope shared by every endpoint, success or error.
#[derive(Serialize, Debug)]
pub struct JsonResponse<T> {
    pub status: String,
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<Uuid>,
    item: Option<T>,
    list: Option<Vec<T>>,
    msg: Option<String>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
            msg: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn set_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.msg = Some(msg.into());
        self
    }

    fn into_response(self, code: StatusCode, message: String) -> JsonResponse<T> {
        let message = match (message.trim().is_empty(), self.msg) {
            (false, _) => message,
            (true, Some(msg)) => msg,
            (true, None) => code
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
        };

        let status = if code.is_success() { "OK" } else { "Error" };

        JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16(),
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.into_response(StatusCode::OK, msg.into()))
    }

    pub fn created<I: Into<String>>(self, msg: I) -> HttpResponse {
        HttpResponse::Created().json(self.into_response(StatusCode::CREATED, msg.into()))
    }

    pub fn error<I: Into<String>>(self, code: StatusCode, msg: I) -> Error {
        let body = self.into_response(code, msg.into());
        let cause = body.message.clone();
        InternalError::from_response(cause, HttpResponse::build(code).json(body)).into()
    }

    pub fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn form_error<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::FORBIDDEN, msg)
    }

    pub fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::CONFLICT, msg)
    }

    pub fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Serialized body, for places that only carry a string (middleware).
    pub fn to_string(self, code: StatusCode) -> String {
        let body = self.into_response(code, String::new());
        serde_json::to_string(&body).unwrap_or_else(|_| body.message)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl JsonResponse<()> {
    pub fn failure(code: StatusCode, message: String) -> Self {
        JsonResponse::<()>::build().into_response(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_ok_envelope() {
        let body = JsonResponse::<String>::build()
            .set_item("React".to_string())
            .ok("OK")
            .into_inner();

        assert_eq!(body.status, "OK");
        assert_eq!(body.code, 200);
        assert_eq!(body.item.as_deref(), Some("React"));
        assert!(body.list.is_none());
    }

    #[test]
    fn test_empty_message_falls_back() {
        let body = JsonResponse::<String>::build().set_msg("custom").ok("").into_inner();
        assert_eq!(body.message, "custom");

        let failure = JsonResponse::failure(StatusCode::NOT_FOUND, String::new());
        assert_eq!(failure.message, "Not Found");
        assert_eq!(failure.status, "Error");
    }

    #[test]
    fn test_error_carries_status() {
        let err = JsonResponse::<String>::build().forbidden("not the owner");
        assert_eq!(err.as_response_error().status_code(), StatusCode::FORBIDDEN);

        let err = JsonResponse::<String>::build().conflict("");
        assert_eq!(err.as_response_error().status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_to_string_is_json() {
        let raw = JsonResponse::<String>::build()
            .set_msg("Authentication required")
            .to_string(StatusCode::UNAUTHORIZED);
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["code"], 401);
        assert_eq!(value["message"], "Authentication required");
    }
}
