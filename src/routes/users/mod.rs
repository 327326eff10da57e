mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_user;
pub use get::{get_user, list_users};
pub use post::create_user;
pub use update::update_user;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::{phone_number::PhoneNumberDomain, user_email::UserEmail, Role},
    models::User,
    routes::error::ApiError
};

// Public view of a user, the password hash is never part of it
#[derive(Serialize, Debug)]
pub struct UserResponse{
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse{
            id: user.user_id,
            username: user.username,
            name: user.name,
            role: user.role,
            email: user.email,
            phone_number: user.phone_number,
            created_at: user.created_at,
            updated_at: user.updated_at
        }
    }
}

fn parse_email(email: Option<String>) -> Result<Option<String>, ApiError>{
    email.filter(|e| !e.trim().is_empty())
        .map(|e| UserEmail::parse(e).map(|e| e.inner()))
        .transpose()
        .map_err(ApiError::Validation)
}

fn parse_phone_number(number: Option<String>) -> Result<Option<String>, ApiError>{
    number.filter(|n| !n.trim().is_empty())
        .map(|n| PhoneNumberDomain::parse(n).map(|n| n.inner()))
        .transpose()
        .map_err(ApiError::Validation)
}
