use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const PRICE_MESSAGE: &str = "Price must be greater than 0";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub price: f64,
    pub size: f64,
    // sized for 1000 characters; longer values are left to the backend to reject
    #[sea_orm(column_type = "String(StringLen::N(1000))", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A property as handed to the store: `id` is `None` until the store assigns one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyRecord {
    pub id: Option<i64>,
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: Option<String>,
}

impl From<Model> for PropertyRecord {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            address: m.address,
            price: m.price,
            size: m.size,
            description: m.description,
        }
    }
}

impl PropertyRecord {
    /// Every column set; `id` left unset when absent so the database generates it.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: match self.id {
                Some(id) => Set(id),
                None => NotSet,
            },
            address: Set(self.address),
            price: Set(self.price),
            size: Set(self.size),
            description: Set(self.description),
        }
    }
}

/// Price is required and must be strictly positive. NaN is rejected too.
pub fn validate_price(price: Option<f64>) -> Result<f64, errors::ModelError> {
    match price {
        Some(p) if p > 0.0 => Ok(p),
        _ => Err(errors::ModelError::Validation(PRICE_MESSAGE.into())),
    }
}
