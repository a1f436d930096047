use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Symbol of the single currency the app works with.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Signed money amount represented as **integer paise** (minor units).
///
/// Every monetary value in the engine (draft amounts, transaction amounts, the
/// displayed balance) goes through this type to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12_50);
/// assert_eq!(amount.minor(), 1250);
/// assert_eq!(amount.to_string(), "₹12.50");
/// assert_eq!(Amount::from_major(10_000).to_string(), "₹10,000");
/// ```
///
/// Parsing from user input (`.` as decimal separator; rejects > 2 decimals):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("500".parse::<Amount>().unwrap().minor(), 50_000);
/// assert_eq!("10.5".parse::<Amount>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer paise.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates a new amount from whole rupees.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Returns the raw value in paise.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = group_thousands(abs / 100);
        let minor = abs % 100;
        if minor == 0 {
            write!(f, "{sign}{CURRENCY_SYMBOL}{major}")
        } else {
            write!(f, "{sign}{CURRENCY_SYMBOL}{major}.{minor:02}")
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string in rupees into paise.
    ///
    /// Accepts an optional leading `+`/`-` and `.` as decimal separator. The
    /// integer part may be omitted when a fraction follows (`.5`).
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let (major_str, minor_str) = match rest.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (rest, None),
        };

        // `.5` is half a rupee; a bare `.` is not an amount.
        let major: i64 = match (major_str, minor_str) {
            ("", None | Some("")) => return Err(invalid()),
            ("", Some(_)) => 0,
            (digits, _) if digits.chars().all(|c| c.is_ascii_digit()) => {
                digits.parse().map_err(|_| overflow())?
            }
            _ => return Err(invalid()),
        };

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_zero_paise_and_groups_thousands() {
        assert_eq!(Amount::new(0).to_string(), "₹0");
        assert_eq!(Amount::new(50_000).to_string(), "₹500");
        assert_eq!(Amount::new(1050).to_string(), "₹10.50");
        assert_eq!(Amount::new(5).to_string(), "₹0.05");
        assert_eq!(Amount::from_major(1_200).to_string(), "₹1,200");
        assert_eq!(Amount::from_major(1_234_567).to_string(), "₹1,234,567");
        assert_eq!(Amount::new(-25_000).to_string(), "-₹250");
    }

    #[test]
    fn parse_accepts_sign_and_fraction() {
        assert_eq!("10".parse::<Amount>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().minor(), 1050);
        assert_eq!("10.".parse::<Amount>().unwrap().minor(), 1000);
        assert_eq!("-0.01".parse::<Amount>().unwrap().minor(), -1);
        assert_eq!("+1.00".parse::<Amount>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Amount>().unwrap().minor(), 230);
    }

    #[test]
    fn parse_accepts_missing_integer_part() {
        assert_eq!(".5".parse::<Amount>().unwrap().minor(), 50);
        assert_eq!(".05".parse::<Amount>().unwrap().minor(), 5);
        assert_eq!("-.25".parse::<Amount>().unwrap().minor(), -25);
        assert!(".".parse::<Amount>().is_err());
        assert!("-.".parse::<Amount>().is_err());
        assert!(".123".parse::<Amount>().is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!("-".parse::<Amount>().is_err());
        assert!("1,000".parse::<Amount>().is_err());
        assert!("12.345".parse::<Amount>().is_err());
        assert!("1e3".parse::<Amount>().is_err());
        assert!("99999999999999999999".parse::<Amount>().is_err());
    }
}
