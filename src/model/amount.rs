//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Amounts are displayed the way a
//! Brazilian Portuguese locale writes money: a period between thousands and a comma before the two
//! decimal places, e.g. `1.234,56`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Represents a money value.
///
/// # Examples
///
/// Display uses `pt-BR` separators with exactly two decimal places:
/// ```
/// # use gf_ledger::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1234.5").unwrap();
/// assert_eq!(amount.to_string(), "1.234,50");
/// ```
///
/// Negative values keep their sign in front:
/// ```
/// # use gf_ledger::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-25.5").unwrap();
/// assert_eq!(amount.to_string(), "-25,50");
/// ```
///
/// Form input that is not a number is treated as zero:
/// ```
/// # use gf_ledger::model::Amount;
/// assert!(Amount::coerce("lots").is_zero());
/// assert!(Amount::coerce("").is_zero());
/// assert!(Amount::coerce(" 12.30 ").is_positive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Parses user input leniently: anything that does not parse as a number becomes zero.
    pub fn coerce(s: &str) -> Self {
        Amount::from_str(s).unwrap_or_default()
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// The shortest plain rendering of the number, with a period as the decimal separator and no
    /// grouping, e.g. `25.5` or `2000`. This is what goes into CSV exports.
    pub fn to_plain_string(&self) -> String {
        self.value().normalize().to_string()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }
        let value = match Decimal::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => Decimal::from_scientific(trimmed).map_err(|_| AmountError(e))?,
        };
        Ok(Amount { value })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self
            .value()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let (sign, num) = if rounded.is_sign_negative() && !rounded.is_zero() {
            ("-", rounded.abs())
        } else {
            ("", rounded.abs())
        };

        // format_num groups with ',' and uses '.' for decimals; swap them for pt-BR.
        let en = format_num::format_num!(",.2", num.to_f64().unwrap_or_default());
        let pt: String = en
            .chars()
            .map(|c| match c {
                ',' => '.',
                '.' => ',',
                other => other,
            })
            .collect();
        write!(f, "{sign}{pt}")
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Written as an exact JSON number, never through f64.
        rust_decimal::serde::arbitrary_precision::serialize(&self.value().normalize(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Amount::new)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.value.saturating_add(rhs.value))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::new(self.value.saturating_sub(rhs.value))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}
