use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

use crate::domain::FieldError;

#[derive(serde::Serialize)]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

/// `{success: false, message}` body shared by every failed submission.
pub(crate) fn failure_response(
    status: StatusCode,
    message: &str,
    errors: Option<&[FieldError]>,
) -> HttpResponse {
    HttpResponse::build(status).json(FailureBody {
        success: false,
        message,
        errors,
    })
}

// Reject undecodable bodies with the same shape as a validation failure.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = failure_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid request body: {}", err),
        None,
    );
    InternalError::from_response(err, response).into()
}
