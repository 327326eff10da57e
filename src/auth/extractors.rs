use actix_session::SessionExt;
use actix_web::{http::StatusCode, web, FromRequest, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    db_interaction::user::{get_user, UserError},
    domain::{OrderVisibility, Permission, Role},
    routes::error::json_error,
    session_state::TypedSession,
    utils::{get_pooled_connection, DbPool}
};

// Identity of the logged in user. The role is read from the users table on
// every request so demotions and deletions apply immediately.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser{
    pub user_id: Uuid,
    pub role: Role
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError{
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("You do not have permission to perform this action")]
    PermissionDenied,
    #[error("Failed to read session")]
    SessionError(#[source] actix_session::SessionGetError),
    #[error("Failed due to internal error")]
    Unexpected(#[source] anyhow::Error)
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotLoggedIn | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::SessionError(_) | AuthError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        json_error(self.status_code(), &self.to_string())
    }
}

impl AuthenticatedUser {
    pub fn require(&self, permission: Permission) -> Result<(), AuthError>{
        if self.role.permits(permission) {
            Ok(())
        } else {
            tracing::info!(user_id = %self.user_id, role = %self.role, ?permission, "Permission denied");
            Err(AuthError::PermissionDenied)
        }
    }

    pub fn order_visibility(&self) -> OrderVisibility{
        self.role.order_visibility(self.user_id)
    }

    async fn load(session: TypedSession, pool: Option<web::Data<DbPool>>) -> Result<Self, AuthError>{
        let user_id = session.get_user_id()
            .map_err(AuthError::SessionError)?
            .ok_or(AuthError::NotLoggedIn)?;

        let pool = pool.ok_or_else(|| AuthError::Unexpected(anyhow::anyhow!("Database pool is not registered")))?;
        let conn = get_pooled_connection(&pool).await
            .map_err(|e| AuthError::Unexpected(anyhow::Error::new(e)))?;

        match get_user(conn, user_id).await {
            Ok(user) => Ok(AuthenticatedUser{ user_id: user.user_id, role: user.role }),
            Err(UserError::NotFound(_)) => {
                tracing::info!(%user_id, "Session refers to a user that no longer exists");
                session.purge();
                Err(AuthError::NotLoggedIn)
            },
            Err(e) => Err(AuthError::Unexpected(anyhow::Error::new(e)))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    #[tracing::instrument(
        "Resolving the authenticated user",
        skip_all
    )]
    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = TypedSession(req.get_session());
        let pool = req.app_data::<web::Data<DbPool>>().cloned();

        let current_span = tracing::Span::current();
        Box::pin(AuthenticatedUser::load(session, pool).instrument(current_span))
    }
}
