//! Nestoria wire records and their mapping onto [`Listing`].

use crate::models::{Address, Currency, Listing, PropertyType};
use serde::{Deserialize, Deserializer};

/// Top-level shape of a `search_listings` response
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResponse,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub listings: Vec<RawNestoriaListing>,
}

/// Nestoria sends several numbers as strings, sometimes as plain numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) if s.trim().is_empty() => Some(0.0),
            Numeric::Text(s) => s.trim().parse().ok(),
        };
        // str::parse accepts "NaN" and "inf"
        value.filter(|v| v.is_finite())
    }
}

/// Listing record exactly as decoded from the wire
///
/// The construction year is still in its raw form; call [`finish`] to
/// resolve it before mapping.
///
/// [`finish`]: RawNestoriaListing::finish
#[derive(Debug, Clone, Deserialize)]
pub struct RawNestoriaListing {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(rename = "summary", default, deserialize_with = "text")]
    pub description: String,
    #[serde(rename = "lister_url", default, deserialize_with = "text")]
    pub url: String,
    #[serde(rename = "lister_name", default, deserialize_with = "text")]
    pub lister: String,
    #[serde(rename = "datasource_name", default, deserialize_with = "text")]
    pub source: String,
    #[serde(default, deserialize_with = "text")]
    pub guid: String,
    #[serde(rename = "construction_year", default)]
    construction_year_raw: Option<Numeric>,
    #[serde(rename = "room_number", default, deserialize_with = "float")]
    pub rooms: f64,
    #[serde(rename = "property_type", default, deserialize_with = "text")]
    pub kind: String,
    /// Comma separated
    #[serde(default, deserialize_with = "text")]
    pub keywords: String,

    #[serde(default, deserialize_with = "whole")]
    pub size: u32,
    #[serde(default, deserialize_with = "text")]
    pub size_unit: String,

    #[serde(default, deserialize_with = "whole")]
    pub price: u32,
    #[serde(rename = "price_coldrent", default, deserialize_with = "whole")]
    pub price_bare: u32,
    #[serde(rename = "price_currency", default, deserialize_with = "text")]
    pub currency: String,

    #[serde(rename = "updated_in_days", default, deserialize_with = "float")]
    pub days_since_update: f64,
}

impl RawNestoriaListing {
    /// Resolves the fields that need work after parsing.
    ///
    /// A missing or unparsable construction year becomes 0.
    pub fn finish(self) -> NestoriaListing {
        let construction_year = self
            .construction_year_raw
            .as_ref()
            .and_then(Numeric::to_f64)
            .and_then(to_u32)
            .unwrap_or(0);

        NestoriaListing {
            raw: self,
            construction_year,
        }
    }
}

/// Finished Nestoria record, ready for normalization
#[derive(Debug, Clone)]
pub struct NestoriaListing {
    raw: RawNestoriaListing,
    construction_year: u32,
}

impl NestoriaListing {
    pub fn construction_year(&self) -> u32 {
        self.construction_year
    }

    /// Maps the record onto the provider-independent listing.
    ///
    /// Keywords are split on `,` without trimming, so an empty keyword
    /// string gives a single empty keyword. Nestoria has no deposit.
    pub fn into_listing(self) -> Listing {
        let NestoriaListing {
            raw,
            construction_year,
        } = self;

        Listing {
            address: Address::default(),
            keywords: raw.keywords.split(',').map(str::to_string).collect(),
            title: raw.title,
            description: raw.description,
            url: raw.url,
            rooms: raw.rooms,
            area: raw.size,
            construction_year,
            property_type: PropertyType::from(raw.kind),
            posted: None,
            updated: None,
            days_since_update: raw.days_since_update,
            price: raw.price,
            price_bare: raw.price_bare,
            deposit: 0,
            currency: Currency::from(raw.currency),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(value) => value
            .to_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("not a number: {value:?}"))),
    }
}

/// Whole numbers within `u32` only, no rounding or clamping.
fn to_u32(value: f64) -> Option<u32> {
    let in_range = value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then_some(value as u32)
}

fn whole<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = float(deserializer)?;
    to_u32(value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a whole number in u32 range, got {value}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({
            "title": "Sunny flat near the park",
            "summary": "Bright two room flat, fitted kitchen",
            "lister_url": "https://www.nestoria.de/detail/1234",
            "lister_name": "Hausverwaltung Mustermann",
            "datasource_name": "ImmobilienScout24",
            "guid": "1234",
            "construction_year": "1998",
            "room_number": 2.5,
            "property_type": "flat",
            "keywords": "balcony,elevator,parking",
            "size": "64",
            "size_unit": "m2",
            "price": 1250,
            "price_coldrent": 980,
            "price_currency": "EUR",
            "updated_in_days": 3.5
        })
    }

    fn decode(value: serde_json::Value) -> RawNestoriaListing {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_every_field() {
        let listing = decode(record()).finish().into_listing();

        assert_eq!(listing.title, "Sunny flat near the park");
        assert_eq!(listing.description, "Bright two room flat, fitted kitchen");
        assert_eq!(listing.url, "https://www.nestoria.de/detail/1234");
        assert_eq!(listing.rooms, 2.5);
        assert_eq!(listing.area, 64);
        assert_eq!(listing.construction_year, 1998);
        assert_eq!(listing.property_type, PropertyType::Other("flat".to_string()));
        assert_eq!(listing.property_type.as_str(), "flat");
        assert_eq!(listing.days_since_update, 3.5);
        assert_eq!(listing.price, 1250);
        assert_eq!(listing.price_bare, 980);
        assert_eq!(listing.currency, Currency::Euro);
        assert_eq!(listing.deposit, 0);
        assert_eq!(listing.keywords, vec!["balcony", "elevator", "parking"]);
    }

    #[test]
    fn missing_construction_year_is_unknown() {
        let mut value = record();
        value.as_object_mut().unwrap().remove("construction_year");
        assert_eq!(decode(value).finish().construction_year(), 0);

        let mut value = record();
        value["construction_year"] = serde_json::Value::Null;
        assert_eq!(decode(value).finish().construction_year(), 0);
    }

    #[test]
    fn unparsable_construction_year_is_unknown() {
        let mut value = record();
        value["construction_year"] = json!("around 1900");
        assert_eq!(decode(value).finish().construction_year(), 0);
    }

    #[test]
    fn numeric_construction_year_is_accepted() {
        let mut value = record();
        value["construction_year"] = json!(1972);
        assert_eq!(decode(value).finish().construction_year(), 1972);
    }

    #[test]
    fn keywords_are_split_without_trimming() {
        let mut value = record();
        value["keywords"] = json!("garden, garage");
        let listing = decode(value).finish().into_listing();
        assert_eq!(listing.keywords, vec!["garden", " garage"]);
    }

    #[test]
    fn empty_keywords_give_one_empty_keyword() {
        let mut value = record();
        value["keywords"] = json!("");
        let listing = decode(value).finish().into_listing();
        assert_eq!(listing.keywords, vec![String::new()]);
    }

    #[test]
    fn known_property_type_and_currency_are_recognized() {
        let mut value = record();
        value["property_type"] = json!("house");
        value["price_currency"] = json!("GBP");
        let listing = decode(value).finish().into_listing();
        assert_eq!(listing.property_type, PropertyType::House);
        assert_eq!(listing.currency, Currency::Pound);
    }

    #[test]
    fn numbers_may_arrive_as_strings() {
        let mut value = record();
        value["room_number"] = json!("3");
        value["price"] = json!("1400");
        value["updated_in_days"] = json!("0.5");
        let listing = decode(value).finish().into_listing();
        assert_eq!(listing.rooms, 3.0);
        assert_eq!(listing.price, 1400);
        assert_eq!(listing.days_since_update, 0.5);
    }

    #[test]
    fn garbage_number_fails_to_decode() {
        let mut value = record();
        value["size"] = json!("large");
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());
    }

    #[test]
    fn non_finite_numbers_fail_to_decode() {
        for bad in ["NaN", "inf", "-infinity"] {
            let mut value = record();
            value["room_number"] = json!(bad);
            assert!(
                serde_json::from_value::<RawNestoriaListing>(value).is_err(),
                "room_number {bad} was accepted"
            );
        }

        let mut value = record();
        value["size"] = json!("inf");
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());
    }

    #[test]
    fn out_of_range_whole_numbers_fail_to_decode() {
        let mut value = record();
        value["price"] = json!("1e12");
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());

        let mut value = record();
        value["price_coldrent"] = json!(4_294_967_296u64);
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());

        let mut value = record();
        value["size"] = json!(-5);
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());
    }

    #[test]
    fn fractional_whole_numbers_fail_to_decode() {
        let mut value = record();
        value["price"] = json!(1250.9);
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());

        let mut value = record();
        value["size"] = json!("64.5");
        assert!(serde_json::from_value::<RawNestoriaListing>(value).is_err());
    }

    #[test]
    fn largest_u32_is_kept_exactly() {
        let mut value = record();
        value["price"] = json!(u32::MAX);
        assert_eq!(decode(value).finish().into_listing().price, u32::MAX);
    }

    #[test]
    fn construction_year_outside_u32_is_unknown() {
        for bad in [json!("1e12"), json!(1998.5), json!("NaN"), json!(-1)] {
            let mut value = record();
            value["construction_year"] = bad.clone();
            assert_eq!(decode(value).finish().construction_year(), 0, "year {bad}");
        }
    }

    #[test]
    fn envelope_without_listings_is_empty() {
        let envelope: SearchEnvelope =
            serde_json::from_value(json!({ "response": { "total_results": 0 } })).unwrap();
        assert!(envelope.response.listings.is_empty());
    }
}
