//! Amount type for posted values
//!
//! Internally stores amounts in hundredths of the currency unit (i64) to
//! avoid floating-point drift when summing twelve months of postings. On
//! disk an amount is a plain JSON number in currency units (`1500`, `12.5`).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed monetary amount stored as hundredths of the currency unit
///
/// `+`, `-` and `Sum` saturate at the i64 bounds; use [`Amount::checked_add`]
/// where overflow must be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use homebudget::models::Amount;
    /// let amount = Amount::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create an amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Convert a value in currency units, rounding to hundredths
    ///
    /// Returns `None` for non-finite or out-of-range values.
    pub fn from_f64_units(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
            Some(Self(cents as i64))
        } else {
            None
        }
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse an amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "10.5", "10" (whole units)
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();
        let invalid = || AmountParseError::InvalidFormat(s.to_string());

        let (negative, digits) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.starts_with(['-', '+']) {
            return Err(invalid());
        }

        let cents = match digits.split_once('.') {
            Some((whole, frac)) => {
                if frac.contains('.') || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };
                let frac: i64 = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac[..2].parse().map_err(|_| invalid())?,
                };
                whole
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(frac))
                    .ok_or_else(invalid)?
            }
            None => digits
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            return self.to_string();
        }
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        };
        f.pad(&text)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number in currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        v.checked_mul(100)
            .map(Amount)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Amount)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64_units(v).ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, m| acc + m)
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
