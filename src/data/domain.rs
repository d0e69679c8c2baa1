use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{DataError, StockGymError},
    impl_add_sub_primitive, impl_from_primitive, impl_neg_primitive,
};

// ================================================================================================
// Domain Strong Types (NewTypes)
// ================================================================================================

/// A price level in the quote currency.
///
/// Used for: Open, High, Low, Close, and the NAV at which a position is
/// entered or exited.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Price(pub f64);
impl_from_primitive!(Price, f64);
impl_add_sub_primitive!(Price, f64);
impl_neg_primitive!(Price, f64);

/// Units of the security currently held.
///
/// The environment only ever assigns whole-unit values (buys floor the
/// division by NAV), but the wrapper keeps `f64` so quantity participates in
/// reward arithmetic without lossy casts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Quantity(pub f64);
impl_from_primitive!(Quantity, f64);
impl_add_sub_primitive!(Quantity, f64);

/// Semantic alias for `Quantity` when referring to aggregated market activity.
pub type Volume = Quantity;

/// Uninvested capital. Never negative while owned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Cash(pub f64);
impl_from_primitive!(Cash, f64);
impl_add_sub_primitive!(Cash, f64);

/// An exchange ticker symbol, e.g. `SBIN` or `RELIANCE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self, StockGymError> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DataError::InvalidSymbol(raw.to_string()).into());
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = StockGymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_symbol_normalizes_to_uppercase() {
        let symbol = Symbol::new("sbin").unwrap();
        assert_eq!(symbol.as_str(), "SBIN");
    }

    #[test]
    fn test_symbol_rejects_empty_and_punctuation() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("SBIN.NS").is_err());
    }

    #[test]
    fn test_price_arithmetic_through_newtype() {
        let delta = Price(12.0) - Price(8.0);
        assert_eq!(delta, Price(4.0));
        assert_eq!(-delta, Price(-4.0));
    }
}
