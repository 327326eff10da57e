use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthenticatedUser,
    domain::{PaymentDetails, Permission},
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::TransactionResponse;

// `payment_method` selects which of the method specific fields are read
#[derive(Deserialize, Debug)]
pub struct CreateTransactionForm{
    pub order_id: Uuid,
    #[serde(flatten)]
    pub details: PaymentDetails
}

#[tracing::instrument(
    "Paying order",
    skip(pool, form),
    fields(order_id = %form.order_id)
)]
pub async fn create_transaction(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    form: web::Json<CreateTransactionForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandlePayments)?;

    let form = form.into_inner();

    let conn = get_pooled_connection(&pool).await?;
    let transaction = crate::db_interaction::transactions::create_transaction(
        conn,
        form.order_id,
        user.user_id,
        user.order_visibility(),
        form.details
    )
    .await?;

    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}
