use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::orders::NewOrder,
    domain::Permission,
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::{OrderLineForm, OrderResponse};

#[derive(Deserialize, Validate, Debug)]
pub struct CreateOrderForm{
    #[validate(range(min = 1))]
    pub table_number: i32,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderLineForm>,
    #[serde(default)]
    pub notes: String
}

/// Takes an order for a table. The logged in user is recorded as the waiter
/// and every line is priced from the catalog at this moment.
#[tracing::instrument(
    "Posting order",
    skip(pool)
)]
pub async fn create_order(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    form: web::Json<CreateOrderForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let form = form.into_inner();
    form.validate()?;

    let new_order = NewOrder{
        waiter_id: user.user_id,
        table_number: form.table_number,
        notes: form.notes,
        lines: form.items.into_iter().map(Into::into).collect()
    };

    let conn = get_pooled_connection(&pool).await?;
    let order = crate::db_interaction::orders::create_order(conn, new_order).await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}
