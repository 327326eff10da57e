use std::str::FromStr;

use diesel::{sql_types::Text, AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus{
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str{
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled"
        }
    }

    // No further business operations are expected on a terminal order
    pub fn is_terminal(&self) -> bool{
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn accepts_payment(&self) -> bool{
        !self.is_terminal()
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("{} is not a valid order status", other))
        }
    }
}

text_sql_enum!(OrderStatus);
