//! Integer minor-unit price type.
//!
//! Prices are stored and transmitted as whole minor units (cents for USD),
//! never as floating point. `Price` guarantees non-negativity by
//! construction.

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative (got {0})")]
    Negative(i32),
}

/// A non-negative price in minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Price(i32);

impl Price {
    /// Create a price from minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is negative.
    pub const fn from_cents(cents: i32) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative(cents));
        }
        Ok(Self(cents))
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn as_cents(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for Price {
    /// Format as a dollar string, e.g. `$59.99`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl TryFrom<i32> for Price {
    type Error = PriceError;

    fn try_from(cents: i32) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl From<Price> for i32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let cents = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_cents(cents)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert_eq!(Price::from_cents(-1), Err(PriceError::Negative(-1)));
    }

    #[test]
    fn test_zero_is_valid() {
        let price = Price::from_cents(0).expect("zero price");
        assert_eq!(price.as_cents(), 0);
    }

    #[test]
    fn test_display() {
        let price = Price::from_cents(5999).expect("price");
        assert_eq!(price.to_string(), "$59.99");

        let price = Price::from_cents(100).expect("price");
        assert_eq!(price.to_string(), "$1.00");

        let price = Price::from_cents(5).expect("price");
        assert_eq!(price.to_string(), "$0.05");
    }

    #[test]
    fn test_serde_plain_integer() {
        let price = Price::from_cents(2499).expect("price");
        assert_eq!(serde_json::to_string(&price).expect("serialize"), "2499");

        let back: Price = serde_json::from_str("2499").expect("deserialize");
        assert_eq!(back, price);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-100").is_err());
    }
}
