use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthenticatedUser,
    db_interaction::transactions::{get_transactions, DateRange, TransactionFilter},
    domain::Permission,
    routes::error::ApiError,
    utils::{get_pooled_connection, page_bounds, DbPool}
};

use super::TransactionResponse;

#[derive(Deserialize, Debug)]
pub struct TransactionQuery{
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>
}

impl TransactionQuery {
    // The range only applies when both ends are given
    fn date_range(&self) -> Result<Option<DateRange>, ApiError>{
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) if from > to => Err(ApiError::Validation(
                "from_date must not be after to_date".to_string()
            )),
            (Some(from), Some(to)) => Ok(Some(DateRange{ from, to })),
            _ => Ok(None)
        }
    }
}

#[tracing::instrument(
    "Getting list of transactions",
    skip(pool)
)]
pub async fn list_transactions(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    query: web::Query<TransactionQuery>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandlePayments)?;

    let range = query.date_range()?;
    let (limit, offset) = page_bounds(query.page, query.limit);

    let conn = get_pooled_connection(&pool).await?;
    let transactions: Vec<TransactionResponse> = get_transactions(
        conn,
        user.order_visibility(),
        TransactionFilter{ range, limit, offset }
    )
    .await?
    .into_iter()
    .map(TransactionResponse::from)
    .collect();

    Ok(HttpResponse::Ok().json(transactions))
}

#[tracing::instrument(
    "Getting transaction",
    skip(pool)
)]
pub async fn get_transaction(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError>{
    user.require(Permission::HandlePayments)?;

    let conn = get_pooled_connection(&pool).await?;
    let transaction = crate::db_interaction::transactions::get_transaction(
        conn,
        path.into_inner(),
        user.order_visibility()
    )
    .await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}
