//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// The currency code is carried as an opaque string because the upstream
/// catalog is authoritative for which currencies exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "COP", "EUR").
    pub currency: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: String) -> Self {
        Self { amount, currency }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_deserializes_numeric_amount() {
        let price: Price = serde_json::from_str(r#"{"amount":150,"currency":"USD"}"#).unwrap();
        assert_eq!(price.amount, Decimal::from(150));
        assert_eq!(price.currency, "USD");
    }

    #[test]
    fn test_price_equality() {
        let a = Price::new(Decimal::new(19999, 2), "USD".to_string());
        let b = Price::new(Decimal::new(19999, 2), "USD".to_string());
        assert_eq!(a, b);
    }
}
