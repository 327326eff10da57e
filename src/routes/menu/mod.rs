mod delete;
mod get;
mod post;
mod update;

pub use delete::delete_menu_item;
pub use get::{get_menu_item, list_menu_items};
pub use post::create_menu_item;
pub use update::{toggle_availability, update_menu_item};

use bigdecimal::BigDecimal;
use validator::ValidationError;

use crate::domain::money::{fits_currency_column, is_negative};

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError>{
    if is_negative(price) {
        return Err(ValidationError::new("price").with_message("price must not be negative".into()))
    }
    if !fits_currency_column(price) {
        return Err(ValidationError::new("price").with_message("price cannot exceed 99999999.99".into()))
    }
    Ok(())
}
