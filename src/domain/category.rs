use std::str::FromStr;

use diesel::{sql_types::Text, AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory{
    #[serde(rename = "entrées", alias = "entrees")]
    Entrees,
    Soup,
    Salad,
    MainCourses,
    Accompaniments,
    Dessert,
    Beverages
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str{
        match self {
            MenuCategory::Entrees => "entrées",
            MenuCategory::Soup => "soup",
            MenuCategory::Salad => "salad",
            MenuCategory::MainCourses => "main-courses",
            MenuCategory::Accompaniments => "accompaniments",
            MenuCategory::Dessert => "dessert",
            MenuCategory::Beverages => "beverages"
        }
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrées" | "entrees" => Ok(MenuCategory::Entrees),
            "soup" => Ok(MenuCategory::Soup),
            "salad" => Ok(MenuCategory::Salad),
            "main-courses" => Ok(MenuCategory::MainCourses),
            "accompaniments" => Ok(MenuCategory::Accompaniments),
            "dessert" => Ok(MenuCategory::Dessert),
            "beverages" => Ok(MenuCategory::Beverages),
            other => Err(format!("{} is not a valid menu category", other))
        }
    }
}

text_sql_enum!(MenuCategory);
