use std::{error::Error, fmt::Debug};

use chrono::{DateTime, NaiveDate, Utc};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, ExpressionMethods, JoinOnDsl, NullableExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    db_interaction::orders::{lock_order, OrderError},
    domain::{OrderStatus, OrderVisibility, PaymentDetails, PaymentError},
    models::Transaction,
    schema::{orders, transactions, users},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

#[derive(Debug, Clone)]
pub struct TransactionDetail{
    pub transaction: Transaction,
    pub table_number: i32,
    pub cashier_name: Option<String>
}

// Inclusive calendar day range, in UTC
#[derive(Debug, Clone, Copy)]
pub struct DateRange{
    pub from: NaiveDate,
    pub to: NaiveDate
}

impl DateRange {
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>){
        let start = self.from.and_time(chrono::NaiveTime::MIN).and_utc();
        let end = (self.to + chrono::Days::new(1)).and_time(chrono::NaiveTime::MIN).and_utc();
        (start, end)
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransactionFilter{
    pub range: Option<DateRange>,
    pub limit: i64,
    pub offset: i64
}

#[derive(Error)]
pub enum TransactionError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] DieselError),
    #[error("order {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("transaction {0} doesn't exist")]
    NoTransactionError(Uuid),
    #[error("order {0} has already been paid")]
    AlreadyPaid(Uuid),
    #[error("order {order_id} is {status} and cannot be paid")]
    NotPayable{
        order_id: Uuid,
        status: OrderStatus
    },
    #[error(transparent)]
    InvalidPayment(#[from] PaymentError),
    #[error("Failed to lock order")]
    LockError(#[source] OrderError)
}

impl From<OrderError> for TransactionError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NoOrderIdError(order_id) => TransactionError::NoOrderIdError(order_id),
            OrderError::RunQueryError(e) => TransactionError::RunQueryError(e),
            e => TransactionError::LockError(e)
        }
    }
}

impl Debug for TransactionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn load_transactions(
    conn: &mut DbConnection,
    transaction_id: Option<Uuid>,
    visibility: OrderVisibility,
    filter: &TransactionFilter
) -> Result<Vec<TransactionDetail>, DieselError>{
    let mut query = transactions::table
        .inner_join(orders::table)
        .left_join(users::table.on(transactions::cashier_id.eq(users::user_id.nullable())))
        .select((Transaction::as_select(), orders::table_number, users::name.nullable()))
        .into_boxed();

    if let Some(transaction_id) = transaction_id {
        query = query.filter(transactions::transaction_id.eq(transaction_id));
    }

    if let OrderVisibility::OwnedBy(user_id) = visibility {
        query = query.filter(orders::waiter_id.eq(user_id));
    }

    if let Some(range) = filter.range {
        let (start, end) = range.bounds();
        query = query
            .filter(transactions::created_at.ge(start))
            .filter(transactions::created_at.lt(end));
    }

    let rows = query
        .order(transactions::created_at.desc())
        .limit(filter.limit)
        .offset(filter.offset)
        .load::<(Transaction, i32, Option<String>)>(conn)?;

    Ok(rows.into_iter()
        .map(|(transaction, table_number, cashier_name)| TransactionDetail{
            transaction,
            table_number,
            cashier_name
        })
        .collect())
}

fn fetch_transaction(
    conn: &mut DbConnection,
    transaction_id: Uuid,
    visibility: OrderVisibility
) -> Result<TransactionDetail, TransactionError>{
    let filter = TransactionFilter{ range: None, limit: 1, offset: 0 };

    load_transactions(conn, Some(transaction_id), visibility, &filter)?
        .pop()
        .ok_or(TransactionError::NoTransactionError(transaction_id))
}

#[tracing::instrument(
    "Getting transactions from db",
    skip(conn)
)]
pub async fn get_transactions(
    mut conn: DbConnection,
    visibility: OrderVisibility,
    filter: TransactionFilter
) -> Result<Vec<TransactionDetail>, TransactionError>{
    let res = spawn_blocking_with_tracing(move || {
        load_transactions(&mut conn, None, visibility, &filter)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting transaction by id",
    skip(conn)
)]
pub async fn get_transaction(
    mut conn: DbConnection,
    transaction_id: Uuid,
    visibility: OrderVisibility
) -> Result<TransactionDetail, TransactionError>{
    spawn_blocking_with_tracing(move || {
        fetch_transaction(&mut conn, transaction_id, visibility)
    })
    .await?
}

/// Pays an order exactly once. The order row stays locked while the payment
/// is validated against its current total, the transaction is written and the
/// order is marked completed.
#[tracing::instrument(
    "Creating transaction for order",
    skip(conn, details),
    fields(payment_method = %details.method())
)]
pub async fn create_transaction(
    mut conn: DbConnection,
    order_id: Uuid,
    cashier_id: Uuid,
    visibility: OrderVisibility,
    details: PaymentDetails
) -> Result<TransactionDetail, TransactionError>{
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<TransactionDetail, TransactionError, _>(|conn| {
            let order = lock_order(conn, order_id, visibility)?;

            let already_paid = transactions::table
                .filter(transactions::order_id.eq(order_id))
                .select(transactions::transaction_id)
                .first::<Uuid>(conn)
                .optional()?
                .is_some();

            if already_paid {
                return Err(TransactionError::AlreadyPaid(order_id))
            }

            if !order.status.accepts_payment() {
                return Err(TransactionError::NotPayable{ order_id, status: order.status })
            }

            let capture = details.capture(&order.total)?;

            let transaction = Transaction{
                transaction_id: Uuid::new_v4(),
                order_id,
                cashier_id: Some(cashier_id),
                payment_method: capture.method,
                amount: capture.amount,
                amount_received: capture.amount_received,
                change_given: capture.change_given,
                card_last_four: capture.card_last_four,
                cardholder_name: capture.cardholder_name,
                account_identifier: capture.account_identifier,
                account_name: capture.account_name,
                created_at: Utc::now()
            };

            diesel::insert_into(transactions::table)
                .values(&transaction)
                .execute(conn)
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
                        TransactionError::AlreadyPaid(order_id),
                    e => TransactionError::RunQueryError(e)
                })?;

            diesel::update(orders::table.find(order_id))
                .set((
                    orders::status.eq(OrderStatus::Completed),
                    orders::updated_at.eq(Utc::now())
                ))
                .execute(conn)?;

            fetch_transaction(conn, transaction.transaction_id, OrderVisibility::All)
        })
    })
    .await??;

    Ok(res)
}
