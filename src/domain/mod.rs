// Stores a closed enum as TEXT, relying on its `as_str` and `FromStr` impls
macro_rules! text_sql_enum {
    ($name:ident) => {
        impl diesel::serialize::ToSql<diesel::sql_types::Text, diesel::pg::Pg> for $name {
            fn to_sql<'b>(
                &'b self,
                out: &mut diesel::serialize::Output<'b, '_, diesel::pg::Pg>
            ) -> diesel::serialize::Result {
                <str as diesel::serialize::ToSql<diesel::sql_types::Text, diesel::pg::Pg>>::to_sql(
                    self.as_str(),
                    out
                )
            }
        }

        impl diesel::deserialize::FromSql<diesel::sql_types::Text, diesel::pg::Pg> for $name {
            fn from_sql(bytes: diesel::pg::PgValue<'_>) -> diesel::deserialize::Result<Self> {
                let value = <String as diesel::deserialize::FromSql<
                    diesel::sql_types::Text,
                    diesel::pg::Pg
                >>::from_sql(bytes)?;

                value.parse::<$name>().map_err(Into::into)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod category;
pub mod display;
pub mod money;
pub mod order_status;
pub mod payment;
pub mod phone_number;
pub mod role;
pub mod totals;
pub mod user_email;

pub use category::MenuCategory;
pub use order_status::OrderStatus;
pub use payment::{PaymentCapture, PaymentDetails, PaymentError, PaymentMethod};
pub use role::{OrderVisibility, Permission, Role};
pub use totals::OrderTotals;
