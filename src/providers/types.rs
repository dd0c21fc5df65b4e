use crate::error::{RepoError, Result};
use crate::models::{PropertyType, TransactionType};
use chrono::{DateTime, Utc};

/// Provider-agnostic search criteria
///
/// Every field is optional and `None` leaves that criterion unconstrained.
/// Providers ignore criteria they cannot express.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// City, district or other place name
    pub city: Option<String>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    /// Half rooms allowed
    pub room_min: Option<f64>,
    pub room_max: Option<f64>,
    /// Square meters
    pub area_min: Option<u32>,
    pub area_max: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub transaction_type: Option<TransactionType>,
    /// Only listings changed at or after this instant
    pub updated_since: Option<DateTime<Utc>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn price(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn rooms(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.room_min = min;
        self.room_max = max;
        self
    }

    pub fn area(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.area_min = min;
        self.area_max = max;
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }

    /// Checks that every range has min <= max where both ends are set.
    pub fn validate(&self) -> Result<()> {
        check_range("price", self.price_min, self.price_max)?;
        check_range("room", self.room_min, self.room_max)?;
        check_range("area", self.area_min, self.area_max)?;
        Ok(())
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    name: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(RepoError::InvalidQuery(format!(
            "{name} minimum {min} is above maximum {max}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_valid() {
        assert!(Query::new().validate().is_ok());
    }

    #[test]
    fn builder_sets_only_given_fields() {
        let query = Query::new()
            .city("Berlin")
            .transaction_type(TransactionType::Rent)
            .rooms(Some(2.0), None);

        assert_eq!(query.city.as_deref(), Some("Berlin"));
        assert_eq!(query.room_min, Some(2.0));
        assert_eq!(query.room_max, None);
        assert_eq!(query.price_min, None);
        assert_eq!(query.updated_since, None);
    }

    #[test]
    fn zero_bound_is_kept_distinct_from_unset() {
        let query = Query::new().price(Some(0), None);
        assert_eq!(query.price_min, Some(0));
        assert!(query.validate().is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Query::new()
            .area(Some(80), Some(40))
            .validate()
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidQuery(_)));
        assert!(err.to_string().contains("area minimum 80 is above maximum 40"));
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(Query::new().rooms(Some(2.5), Some(2.5)).validate().is_ok());
    }
}
