//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are kept in the currency's standard unit (dollars, not cents) and
/// serialize as decimal strings so no precision is lost on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Number of decimal places kept after price arithmetic.
    pub const SCALE: u32 = 2;

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a US dollar price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Multiply the price by a quantity.
    ///
    /// Returns `None` if the result would overflow.
    #[must_use]
    pub fn checked_times(&self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Apply a fractional discount (e.g. `0.15` for 15% off), rounding the
    /// result to cents with half-up rounding.
    #[must_use]
    pub fn discounted(&self, rate: Decimal) -> Self {
        let factor = Decimal::ONE - rate;
        let amount = (self.amount * factor)
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self::new(amount, self.currency_code)
    }

    /// The amount rounded and padded to cents (e.g. `110` becomes `110.00`).
    #[must_use]
    pub fn to_cents_precision(&self) -> Decimal {
        let mut amount = self
            .amount
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(Self::SCALE);
        amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.currency_code.symbol(),
            self.to_cents_precision()
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        let price = Price::usd(Decimal::from(110));
        assert_eq!(price.to_string(), "$110.00");
    }

    #[test]
    fn test_checked_times() {
        let price = Price::usd(Decimal::from(110));
        let total = price.checked_times(2).unwrap();
        assert_eq!(total.amount, Decimal::from(220));
        assert_eq!(total.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_discounted_rounds_to_cents() {
        // 12 * 0.85 = 10.2
        let price = Price::usd(Decimal::from(12));
        let discounted = price.discounted(Decimal::new(15, 2));
        assert_eq!(discounted.to_cents_precision().to_string(), "10.20");

        // 0.99 * 0.85 = 0.8415 -> 0.84
        let price = Price::usd(Decimal::new(99, 2));
        assert_eq!(
            price.discounted(Decimal::new(15, 2)).amount,
            Decimal::new(84, 2)
        );
    }

    #[test]
    fn test_deserialize_defaults_currency() {
        let price: Price = serde_json::from_str(r#"{"amount": "80"}"#).unwrap();
        assert_eq!(price.amount, Decimal::from(80));
        assert_eq!(price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_deserialize_numeric_amount() {
        let price: Price = serde_json::from_str(r#"{"amount": 60, "currencyCode": "EUR"}"#).unwrap();
        assert_eq!(price.amount, Decimal::from(60));
        assert_eq!(price.to_string(), "€60.00");
    }
}
