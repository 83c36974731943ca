//! Record types persisted by the scraper
//!
//! The serialized shape matches the checkpoint files: `products.json` holds
//! an array of [`ProductRecord`], `product_urls.json` an array of
//! [`ProductUrlEntry`].

mod value;

pub use value::{Attribute, AttributeValue};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One discovered listing URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUrlEntry {
    pub url: String,
}

impl ProductUrlEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Structured data extracted from one listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub seller: Option<Seller>,
    pub price: Price,
    pub photos: Vec<String>,
    /// Recognized attributes keyed by their English name
    #[serde(rename = "parametrs")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Agent or agency shown in the listing's contact box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub quantity: PriceQuantity,
    pub currency: Option<String>,
}

/// A numeric amount, or the listing's own wording when it shows no number
/// (e.g. "Prezzo su richiesta")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceQuantity {
    Amount(f64),
    Raw(String),
}

impl PriceQuantity {
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Raw(_) => None,
        }
    }
}
