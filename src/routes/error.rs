use std::{error::Error, fmt::Debug};

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest,
    HttpResponse,
    ResponseError
};
use serde_json::json;

use crate::{
    auth::AuthError,
    db_interaction::{menu::MenuError, orders::OrderError, transactions::TransactionError, user::UserError},
    utils::{error_fmt_chain, PoolGetError}
};

pub fn json_error(status: StatusCode, message: &str) -> HttpResponse{
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": message
    }))
}

// Error returned by every resource handler, rendered as a JSON body
#[derive(thiserror::Error)]
pub enum ApiError{
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Not logged in")]
    NotAuthenticated,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Failed due to internal error")]
    Unexpected(#[source] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials(_) | ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Auth(e) => e.status_code(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error(self.status_code(), &self.to_string())
    }
}

// Extractor rejections are rendered in the same envelope as handler errors
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::Validation(err.to_string()).into()
}

pub fn query_payload_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::Validation(err.to_string()).into()
}

// An unparseable id names no resource
pub fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error{
    ApiError::NotFound(err.to_string()).into()
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Unexpected(e)
    }
}

impl From<PoolGetError> for ApiError {
    fn from(e: PoolGetError) -> Self {
        ApiError::Unexpected(anyhow::Error::new(e))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(_) => ApiError::NotFound(e.to_string()),
            MenuError::InUse(_) => ApiError::Conflict(e.to_string()),
            MenuError::ThreadpoolError(_) | MenuError::QueryError(_) => ApiError::Unexpected(anyhow::Error::new(e))
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NoOrderIdError(_)
            | OrderError::NoOrderItemError(_)
            | OrderError::NoMenuItemError(_) => ApiError::NotFound(e.to_string()),
            OrderError::MenuItemUnavailable(_)
            | OrderError::AmountOutOfRange => ApiError::Validation(e.to_string()),
            OrderError::TerminalOrder { .. } => ApiError::Conflict(e.to_string()),
            OrderError::ThreadpoolError(_) | OrderError::RunQueryError(_) => ApiError::Unexpected(anyhow::Error::new(e))
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::NoOrderIdError(_) | TransactionError::NoTransactionError(_) => ApiError::NotFound(e.to_string()),
            TransactionError::AlreadyPaid(_) | TransactionError::NotPayable { .. } => ApiError::Conflict(e.to_string()),
            TransactionError::InvalidPayment(_) => ApiError::Validation(e.to_string()),
            TransactionError::ThreadpoolError(_)
            | TransactionError::RunQueryError(_)
            | TransactionError::LockError(_) => ApiError::Unexpected(anyhow::Error::new(e))
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => ApiError::NotFound(e.to_string()),
            UserError::UsernameTaken(_) => ApiError::Conflict(e.to_string()),
            UserError::SelfDelete => ApiError::Validation(e.to_string()),
            UserError::ThreadpoolError(_)
            | UserError::QueryError(_)
            | UserError::HashError(_) => ApiError::Unexpected(anyhow::Error::new(e))
        }
    }
}
