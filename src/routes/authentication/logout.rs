use actix_web::HttpResponse;
use serde_json::json;

use crate::session_state::TypedSession;

#[tracing::instrument(
    "Logging out user",
    skip_all
)]
pub async fn logout(
    session: TypedSession
) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "success": true }))
}
