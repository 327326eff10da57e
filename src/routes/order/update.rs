use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    domain::{OrderStatus, Permission},
    models::OrderChanges,
    routes::error::ApiError,
    utils::{get_pooled_connection, DbPool}
};

use super::OrderResponse;

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateOrderForm{
    #[validate(range(min = 1))]
    pub table_number: Option<i32>,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>
}

#[tracing::instrument(
    "Updating order",
    skip(pool)
)]
pub async fn update_order(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    form: web::Json<UpdateOrderForm>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandleOrders)?;

    let form = form.into_inner();
    form.validate()?;

    let changes = OrderChanges{
        table_number: form.table_number,
        status: form.status,
        notes: form.notes,
        updated_at: None
    };

    let conn = get_pooled_connection(&pool).await?;
    let order = crate::db_interaction::orders::update_order(
        conn,
        path.into_inner(),
        user.order_visibility(),
        changes
    )
    .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
