use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Largest amount a `DECIMAL(10, 2)` column holds.
pub const PRICE_MAX_CENTS: u64 = 9_999_999_999;

/// Nightly room price, kept in cents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(u64);

impl Price {
    pub fn from_cents(cents: u64) -> Result<Self, PriceError> {
        if cents == 0 {
            return Err(PriceError::NotPositive);
        }
        if cents > PRICE_MAX_CENTS {
            return Err(PriceError::TooHigh);
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Plain decimal form, as stored and as typed into forms: `1250.50`.
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace(',', ".");
        let (units, fraction) = match s.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (s.as_str(), ""),
        };
        if units.is_empty()
            || !units.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PriceError::Malformed);
        }
        if fraction.len() > 2 {
            return Err(PriceError::TooPrecise);
        }
        let units = units.parse::<u64>().map_err(|_| PriceError::TooHigh)?;
        let fraction = format!("{fraction:0<2}")
            .parse::<u64>()
            .map_err(|_| PriceError::Malformed)?;
        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or(PriceError::TooHigh)?;
        Self::from_cents(cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:02} €",
            (self.0 / 100).to_formatted_string(&Locale::fr),
            self.0 % 100
        )
    }
}

#[derive(Error, Display, Debug, PartialEq, Eq)]
pub enum PriceError {
    #[display(fmt = "Price must be a number")]
    Malformed,
    #[display(fmt = "Price accepts at most two decimals")]
    TooPrecise,
    #[display(fmt = "Price must be positive")]
    NotPositive,
    #[display(fmt = "Price must not exceed 99999999.99")]
    TooHigh,
}
