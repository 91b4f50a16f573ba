//! Fixed-point price representation.
//!
//! Money is stored in minor currency units (e.g. cents) as an `i64`. All
//! arithmetic is checked so order totals can never silently wrap or drift
//! the way floating-point totals do.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units.
///
/// ```
/// use cartify_core::Price;
///
/// let unit = Price::from_minor_units(1099); // 10.99
/// let line = unit.checked_mul(3).unwrap();
/// assert_eq!(line.minor_units(), 3297);
/// assert_eq!(line.to_string(), "32.97");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor currency units.
    #[must_use]
    pub const fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    /// Get the amount in minor currency units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Multiply by a line-item quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: i64) -> Option<Self> {
        match self.0.checked_mul(quantity) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Add another amount, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Price {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

// SQLx support (with postgres feature) - stored as BIGINT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let units = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(units))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_roundtrip() {
        let price = Price::from_minor_units(1999);
        assert_eq!(price.minor_units(), 1999);
        assert_eq!(i64::from(price), 1999);
    }

    #[test]
    fn test_checked_mul() {
        let price = Price::from_minor_units(1000);
        assert_eq!(price.checked_mul(3).unwrap().minor_units(), 3000);
        assert!(Price::from_minor_units(i64::MAX).checked_mul(2).is_none());
    }

    #[test]
    fn test_checked_add() {
        let total = Price::from_minor_units(20)
            .checked_add(Price::from_minor_units(5))
            .unwrap();
        assert_eq!(total.minor_units(), 25);
        assert!(
            Price::from_minor_units(i64::MAX)
                .checked_add(Price::from_minor_units(1))
                .is_none()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_minor_units(1234).to_string(), "12.34");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!(Price::from_minor_units(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_minor_units(499);
        assert_eq!(serde_json::to_string(&price).unwrap(), "499");
        let parsed: Price = serde_json::from_str("499").unwrap();
        assert_eq!(parsed, price);
    }
}
