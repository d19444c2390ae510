//! Currency amounts
//!
//! Amounts are counted in hastings, the smallest indivisible unit.
//! One siacoin (SC) is 10^24 hastings. All arithmetic stays in an
//! arbitrary-precision decimal so long chains of sums and products over
//! large magnitudes never pick up floating point error.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{EngineError, Result};

/// Fractional digits kept after a division
pub const DECIMAL_PLACES: i64 = 24;

/// Hastings per siacoin, as a power of ten
const SIACOIN_EXPONENT: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(BigDecimal);

impl Money {
    pub fn zero() -> Self {
        Money(BigDecimal::zero())
    }

    /// Parse a decimal count of hastings, e.g. `"150000000000000000000000"`
    pub fn from_hastings(hastings: &str) -> Result<Self> {
        parse_decimal(hastings).map(Money)
    }

    /// Parse an amount in display units, e.g. `"1.5"` for 1.5 SC
    pub fn from_siacoins(siacoins: &str) -> Result<Self> {
        let sc = parse_decimal(siacoins)?;
        Ok(Money(&sc * &siacoin_factor()))
    }

    pub fn from_siacoins_int(siacoins: u64) -> Self {
        Money(&BigDecimal::from(siacoins) * &siacoin_factor())
    }

    pub fn from_hastings_int(hastings: u64) -> Self {
        Money(BigDecimal::from(hastings))
    }

    /// Convert to display units (SC)
    pub fn to_siacoins(&self) -> BigDecimal {
        &self.0 * &BigDecimal::new(BigInt::from(1), SIACOIN_EXPONENT)
    }

    pub fn hastings(&self) -> &BigDecimal {
        &self.0
    }

    pub fn plus(&self, other: &Money) -> Money {
        Money(&self.0 + &other.0)
    }

    pub fn minus(&self, other: &Money) -> Money {
        Money(&self.0 - &other.0)
    }

    pub fn times(&self, other: &Money) -> Money {
        Money(&self.0 * &other.0)
    }

    pub fn times_int(&self, factor: u64) -> Money {
        Money(&self.0 * &BigDecimal::from(factor))
    }

    /// Multiply by a rate such as `0.12`
    ///
    /// The rate goes through its shortest decimal rendering, so `0.12` is
    /// exactly twelve hundredths rather than the nearest binary fraction.
    pub fn times_rate(&self, rate: f64) -> Result<Money> {
        if !rate.is_finite() {
            return Err(EngineError::InvalidAmount(rate.to_string()));
        }
        let rate = parse_decimal(&rate.to_string())?;
        Ok(Money(&self.0 * &rate))
    }

    /// Exact division by a count, rounded to [`DECIMAL_PLACES`]
    ///
    /// Returns `None` when `divisor` is zero.
    pub fn div_int(&self, divisor: u64) -> Option<Money> {
        if divisor == 0 {
            return None;
        }
        Some(Money(round_quotient(&self.0 / &BigDecimal::from(divisor))))
    }

    /// Ratio of two amounts, rounded to [`DECIMAL_PLACES`]
    ///
    /// Returns `None` when `divisor` is zero.
    pub fn checked_div(&self, divisor: &Money) -> Option<BigDecimal> {
        if divisor.is_zero() {
            return None;
        }
        Some(round_quotient(&self.0 / &divisor.0))
    }

    /// Clamp negative amounts to zero
    pub fn max_zero(self) -> Money {
        if self.0 < BigDecimal::zero() {
            Money::zero()
        } else {
            self
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Renders the raw hastings count
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.normalized().to_plain_string())
    }
}

impl FromStr for Money {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Money::from_hastings(s)
    }
}

/// Format an amount for display, e.g. `"1.5 SC"`
///
/// # Examples
/// ```
/// use siaview::logic::money::{format_siacoins, Money};
///
/// let amount = Money::from_hastings("1500000000000000000000000").unwrap();
/// assert_eq!(format_siacoins(&amount), "1.5 SC");
/// assert_eq!(format_siacoins(&Money::zero()), "0 SC");
/// ```
pub fn format_siacoins(amount: &Money) -> String {
    format!("{} SC", amount.to_siacoins().normalized().to_plain_string())
}

fn siacoin_factor() -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -SIACOIN_EXPONENT)
}

fn round_quotient(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(DECIMAL_PLACES, RoundingMode::HalfUp)
}

fn parse_decimal(text: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(text.trim()).map_err(|_| EngineError::InvalidAmount(text.to_string()))
}

/// The daemon sends amounts as decimal strings. Bare JSON integers are
/// accepted for hastings, any bare number for siacoins.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Int(u64),
    Float(f64),
}

impl RawAmount {
    fn into_text(self) -> String {
        match self {
            RawAmount::Text(s) => s,
            RawAmount::Int(n) => n.to_string(),
            RawAmount::Float(x) => x.to_string(),
        }
    }

    /// Fractional or beyond-`u64` numbers went through `f64` and are no
    /// longer exact
    fn into_hastings_text(self) -> std::result::Result<String, String> {
        match self {
            RawAmount::Float(x) => Err(format!(
                "hastings amount {} is not an exact integer, send it as a string",
                x
            )),
            raw => Ok(raw.into_text()),
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawAmount::deserialize(deserializer)?
            .into_hastings_text()
            .map_err(serde::de::Error::custom)?;
        Money::from_hastings(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for amounts written in display units (SC)
pub mod siacoins {
    use super::{format_siacoins, Money, RawAmount};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        let text = format_siacoins(amount);
        serializer.serialize_str(text.trim_end_matches(" SC"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = RawAmount::deserialize(deserializer)?.into_text();
        Money::from_siacoins(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sc(amount: &str) -> Money {
        Money::from_siacoins(amount).unwrap()
    }

    #[test]
    fn test_siacoin_conversion() {
        let one = sc("1");
        assert_eq!(one.to_string(), "1000000000000000000000000");
        assert_eq!(one.to_siacoins(), BigDecimal::from(1));
    }

    #[test]
    fn test_fractional_siacoins() {
        assert_eq!(sc("0.000000000000000000000001").to_string(), "1");
        assert_eq!(format_siacoins(&sc("240")), "240 SC");
        assert_eq!(format_siacoins(&sc("0.25")), "0.25 SC");
    }

    #[test]
    fn test_invalid_amount() {
        assert_eq!(
            Money::from_hastings("12abc"),
            Err(EngineError::InvalidAmount("12abc".to_string()))
        );
        assert!(Money::from_siacoins("").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_hastings_int(300);
        let b = Money::from_hastings_int(100);
        assert_eq!(a.plus(&b), Money::from_hastings_int(400));
        assert_eq!(a.minus(&b), Money::from_hastings_int(200));
        assert_eq!(a.times(&b), Money::from_hastings_int(30_000));
        assert_eq!(a.times_int(3), Money::from_hastings_int(900));
    }

    #[test]
    fn test_rate_is_exact_decimal() {
        let funds = Money::from_hastings_int(100);
        assert_eq!(funds.times_rate(0.12).unwrap(), Money::from_hastings_int(12));
        assert!(funds.times_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_division_rounds_to_decimal_places() {
        let third = Money::from_hastings_int(1).div_int(3).unwrap();
        assert_eq!(third.to_string(), "0.333333333333333333333333");

        let two_thirds = Money::from_hastings_int(2).div_int(3).unwrap();
        assert_eq!(two_thirds.to_string(), "0.666666666666666666666667");
    }

    #[test]
    fn test_division_by_zero_is_none() {
        assert!(Money::from_hastings_int(5).div_int(0).is_none());
        assert!(Money::from_hastings_int(5).checked_div(&Money::zero()).is_none());
    }

    #[test]
    fn test_max_zero() {
        let negative = Money::from_hastings_int(1).minus(&Money::from_hastings_int(5));
        assert!(negative.max_zero().is_zero());
        assert_eq!(Money::from_hastings_int(7).max_zero(), Money::from_hastings_int(7));
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_text: Money = serde_json::from_str("\"123456789012345678901234567890\"").unwrap();
        assert_eq!(from_text.to_string(), "123456789012345678901234567890");

        let from_number: Money = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, Money::from_hastings_int(42));

        assert!(serde_json::from_str::<Money>("\"lots\"").is_err());
    }

    #[test]
    fn test_inexact_bare_number_rejected() {
        assert!(serde_json::from_str::<Money>("1e30").is_err());
        assert!(serde_json::from_str::<Money>("1000000000000000000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("1.5").is_err());

        let exact: Money = serde_json::from_str("\"1000000000000000000000000000000\"").unwrap();
        assert_eq!(exact.to_string(), "1000000000000000000000000000000");
    }

    #[test]
    fn test_siacoins_adapter_accepts_bare_float() {
        #[derive(Deserialize)]
        struct Fee {
            #[serde(with = "siacoins")]
            fee: Money,
        }
        let parsed: Fee = serde_json::from_str(r#"{"fee": 10.5}"#).unwrap();
        assert_eq!(parsed.fee, sc("10.5"));
    }

    #[test]
    fn test_serialize_as_hastings_string() {
        let json = serde_json::to_string(&Money::from_hastings_int(10)).unwrap();
        assert_eq!(json, "\"10\"");
    }
}
