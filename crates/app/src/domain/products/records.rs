//! Product Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Electronics,
    Apparel,
    Footwear,
    Furniture,
    Appliances,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Apparel,
        Self::Footwear,
        Self::Furniture,
        Self::Appliances,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Apparel => "Apparel",
            Self::Footwear => "Footwear",
            Self::Furniture => "Furniture",
            Self::Appliances => "Appliances",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}
