use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing attributes the scraper knows how to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Locals,
    DateOfSale,
    Surface,
    Bathrooms,
    Plan,
}

impl Attribute {
    /// Translates the site's Italian feature label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "locali" => Some(Self::Locals),
            "data vendita" => Some(Self::DateOfSale),
            "superficie" => Some(Self::Surface),
            "bagni" => Some(Self::Bathrooms),
            "piano" => Some(Self::Plan),
            _ => None,
        }
    }

    /// Key used in the persisted record
    pub fn key(&self) -> &'static str {
        match self {
            Self::Locals => "locals",
            Self::DateOfSale => "date_of_sale",
            Self::Surface => "surface",
            Self::Bathrooms => "bathrooms",
            Self::Plan => "plan",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parsed value of one listing attribute
///
/// Serialized untagged: integers as numbers, text and dates as strings,
/// quantities as `{"quantity", "unit"}` and missing values as `null`.
/// Dates read back from a checkpoint file come back as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
    Quantity { quantity: f64, unit: String },
    Date(String),
    Missing,
}
