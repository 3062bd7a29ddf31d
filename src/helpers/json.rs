use crate::forms::FieldError;
use crate::models;
use crate::services::ProductError;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde_derive::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// Error body in the `{"detail": ...}` shape, carrying its own status.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    status: StatusCode,
    detail: Detail,
}

impl ErrorResponse {
    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        ErrorResponse {
            status,
            detail: Detail::Message(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::message(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        let msg: String = message.into();
        let msg = if !msg.trim().is_empty() {
            msg
        } else {
            String::from("Internal error")
        };
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn form_error(errors: Vec<FieldError>) -> Self {
        ErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: Detail::Fields(errors),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Detail::Message(msg) => write!(f, "{}: {}", self.status, msg),
            Detail::Fields(errors) => write!(f, "{}: {} invalid field(s)", self.status, errors.len()),
        }
    }
}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(self)
    }
}

impl From<ProductError> for ErrorResponse {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => {
                tracing::info!("{}", msg);
                Self::not_found(msg)
            }
            ProductError::Insertion(msg) => {
                tracing::warn!("Insertion rejected: {}", msg);
                Self::bad_request(msg)
            }
            err @ ProductError::NoFieldsToUpdate => Self::bad_request(err.to_string()),
            ProductError::Storage(msg) => {
                tracing::error!("Storage failure: {}", msg);
                Self::internal_server_error(msg)
            }
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    let error = match &err {
        JsonPayloadError::Deserialize(json_err) if json_err.is_syntax() || json_err.is_eof() => {
            let position = format!("{}:{}", json_err.line(), json_err.column());
            FieldError::new(
                "json_invalid",
                &["body", position.as_str()],
                format!("JSON decode error: {}", json_err),
                Value::Null,
            )
        }
        _ => FieldError::new("json_invalid", &["body"], err.to_string(), Value::Null),
    };
    ErrorResponse::form_error(vec![error]).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected path {}: {}", req.path(), err);
    let raw = req.match_info().get("id");
    let input = raw
        .map(|id| Value::String(id.to_string()))
        .unwrap_or(Value::Null);

    // A well-formed UUID only fails extraction when it is not version 4
    let error = match raw.map(Uuid::parse_str) {
        Some(Ok(_)) => FieldError::new(
            "uuid_version",
            &["path", "id"],
            models::UUID_VERSION_MESSAGE,
            input,
        ),
        _ => FieldError::new(
            "uuid_parsing",
            &["path", "id"],
            "Input should be a valid UUID",
            input,
        ),
    };
    ErrorResponse::form_error(vec![error]).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected query {}: {}", req.query_string(), err);
    let params = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|query| query.into_inner())
        .unwrap_or_default();

    let mut errors: Vec<FieldError> = ["min_price", "max_price"]
        .iter()
        .filter_map(|name| {
            params
                .get(*name)
                .filter(|value| value.parse::<i64>().is_err())
                .map(|value| {
                    FieldError::new(
                        "int_parsing",
                        &["query", *name],
                        "Input should be a valid integer, unable to parse string as an integer",
                        Value::String(value.clone()),
                    )
                })
        })
        .collect();

    if errors.is_empty() {
        errors.push(FieldError::new(
            "value_error",
            &["query"],
            err.to_string(),
            Value::String(req.query_string().to_string()),
        ));
    }
    ErrorResponse::form_error(errors).into()
}
