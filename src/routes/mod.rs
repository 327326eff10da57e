pub mod authentication;
pub mod error;
pub mod health_check;
pub mod menu;
pub mod order;
pub mod transaction;
pub mod users;

pub use health_check::health_check;

use serde::{Deserialize, Deserializer};

// Tells an absent field (None) apart from an explicit null (Some(None))
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>
{
    Option::<T>::deserialize(deserializer).map(Some)
}
