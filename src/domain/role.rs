use std::str::FromStr;

use diesel::{sql_types::Text, AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Role{
    Customer,
    Waiter,
    Cashier,
    Manager
}

// Capabilities checked at each protected endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission{
    ReadCatalog,
    ManageCatalog,
    ManageUsers,
    HandleOrders,
    HandlePayments
}

// Which orders a user is allowed to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderVisibility{
    All,
    OwnedBy(Uuid)
}

impl Role {
    pub fn as_str(&self) -> &'static str{
        match self {
            Role::Customer => "customer",
            Role::Waiter => "waiter",
            Role::Cashier => "cashier",
            Role::Manager => "manager"
        }
    }

    pub fn permits(&self, permission: Permission) -> bool{
        match permission {
            Permission::ReadCatalog => true,
            Permission::HandleOrders | Permission::HandlePayments => true,
            Permission::ManageCatalog | Permission::ManageUsers => match self {
                Role::Manager => true,
                Role::Customer | Role::Waiter | Role::Cashier => false
            }
        }
    }

    pub fn order_visibility(&self, user_id: Uuid) -> OrderVisibility{
        match self {
            Role::Manager | Role::Cashier => OrderVisibility::All,
            Role::Waiter | Role::Customer => OrderVisibility::OwnedBy(user_id)
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "waiter" => Ok(Role::Waiter),
            "cashier" => Ok(Role::Cashier),
            "manager" => Ok(Role::Manager),
            other => Err(format!("{} is not a valid role", other))
        }
    }
}

text_sql_enum!(Role);
