pub mod pipeline;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use pipeline::{filter, ordered_by, MultiSorter};

/// Currency a listing is priced in
///
/// Codes other than the well-known ones are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Euro,
    Dollar,
    Pound,
    Other(String),
}

impl Currency {
    pub fn as_str(&self) -> &str {
        match self {
            Currency::Euro => "EUR",
            Currency::Dollar => "USD",
            Currency::Pound => "GBP",
            Currency::Other(code) => code,
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        match code {
            "EUR" => Currency::Euro,
            "USD" => Currency::Dollar,
            "GBP" => Currency::Pound,
            other => Currency::Other(other.to_string()),
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::from(code.as_str())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.as_str().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of property on offer
///
/// Providers may report types outside this set; those pass through as
/// `Other` with the provider's string untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Apartment,
    House,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Other(kind) => kind,
        }
    }
}

impl From<&str> for PropertyType {
    fn from(kind: &str) -> Self {
        match kind {
            "apartment" => PropertyType::Apartment,
            "house" => PropertyType::House,
            other => PropertyType::Other(other.to_string()),
        }
    }
}

impl From<String> for PropertyType {
    fn from(kind: String) -> Self {
        PropertyType::from(kind.as_str())
    }
}

impl From<PropertyType> for String {
    fn from(kind: PropertyType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of transaction a search is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Renting a flat/house
    Rent,
    /// Buying a flat/house
    Buy,
    /// Shared flat/house
    Share,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Rent => "rent",
            TransactionType::Buy => "buy",
            TransactionType::Share => "share",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address of a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: u32,
    pub postcode: String,
}

/// Provider-independent real-estate listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub address: Address,
    /// Short title of the listing
    pub title: String,
    /// Description given by the owner
    pub description: String,
    pub url: String,
    /// Number of rooms, half rooms allowed
    pub rooms: f64,
    /// Area in m²
    pub area: u32,
    /// Year of construction, 0 if unknown
    pub construction_year: u32,
    pub property_type: PropertyType,
    pub keywords: Vec<String>,

    pub posted: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Recency as reported by the provider
    pub days_since_update: f64,

    /// Monthly price with energy and other costs included
    pub price: u32,
    /// Monthly price without utilities
    pub price_bare: u32,
    /// Security deposit, 0 if none
    pub deposit: u32,
    pub currency: Currency,
}
