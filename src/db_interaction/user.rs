use std::{error::Error, fmt::Debug};

use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::Role, models::{User, UserChanges}, password::compute_password_hash, schema::users, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Debug)]
pub struct NewUser{
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Role
}

#[derive(Error)]
pub enum UserError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed due to database error")]
    QueryError(#[from] DieselError),
    #[error("Failed to hash password")]
    HashError(#[source] anyhow::Error),
    #[error("user {0} doesn't exist")]
    NotFound(Uuid),
    #[error("username {0} is already taken")]
    UsernameTaken(String),
    #[error("You cannot delete your own account")]
    SelfDelete
}

impl Debug for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn hash(password: SecretString) -> Result<String, UserError>{
    compute_password_hash(password)
        .map(|hash| hash.expose_secret().to_string())
        .map_err(UserError::HashError)
}

// Function to query user from username, used by login
#[tracing::instrument(
    "Getting user by username",
    skip(conn)
)]
pub async fn get_user_by_username(
    mut conn: DbConnection,
    username: String
) -> Result<Option<User>, UserError>{
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting user by id",
    skip(conn)
)]
pub async fn get_user(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<User, UserError>{
    spawn_blocking_with_tracing(move || {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()?
            .ok_or(UserError::NotFound(user_id))
    })
    .await?
}

#[tracing::instrument(
    "Getting users from db",
    skip(conn)
)]
pub async fn get_users(
    mut conn: DbConnection,
    limit: i64,
    offset: i64
) -> Result<Vec<User>, UserError>{
    let res = spawn_blocking_with_tracing(move || {
        users::table
            .select(User::as_select())
            .order(users::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load::<User>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting user into the database",
    skip(conn, new_user),
    fields(username = %new_user.username, role = %new_user.role)
)]
pub async fn insert_user(
    mut conn: DbConnection,
    new_user: NewUser
) -> Result<User, UserError>{
    spawn_blocking_with_tracing(move || {
        let now = Utc::now();
        let user = User{
            user_id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: hash(new_user.password)?,
            name: new_user.name,
            email: new_user.email,
            phone_number: new_user.phone_number,
            role: new_user.role,
            created_at: now,
            updated_at: now
        };

        diesel::insert_into(users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
                    UserError::UsernameTaken(user.username.clone()),
                e => UserError::QueryError(e)
            })
    })
    .await?
}

#[tracing::instrument(
    "Updating user",
    skip(conn, changes, password)
)]
pub async fn update_user(
    mut conn: DbConnection,
    user_id: Uuid,
    mut changes: UserChanges,
    password: Option<SecretString>
) -> Result<User, UserError>{
    spawn_blocking_with_tracing(move || {
        if let Some(password) = password {
            changes.password_hash = Some(hash(password)?);
        }
        changes.updated_at = Some(Utc::now());

        diesel::update(users::table.find(user_id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result::<User>(&mut conn)
            .optional()?
            .ok_or(UserError::NotFound(user_id))
    })
    .await?
}

#[tracing::instrument(
    "Deleting user",
    skip(conn)
)]
pub async fn delete_user(
    mut conn: DbConnection,
    user_id: Uuid,
    acting_user_id: Uuid
) -> Result<(), UserError>{
    if user_id == acting_user_id {
        return Err(UserError::SelfDelete)
    }

    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(users::table.find(user_id))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(UserError::NotFound(user_id))
        }
        Ok(())
    })
    .await?
}
