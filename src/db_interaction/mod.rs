pub mod menu;
pub mod orders;
pub mod transactions;
pub mod user;
