//! Supported serial line speeds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A line speed from the fixed set the client offers.
///
/// Construction goes through [`BaudRate::new`] or [`FromStr`], so a value of
/// this type is always one of [`BaudRate::SUPPORTED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BaudRate(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaudRateError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("unsupported baud rate {0}")]
    Unsupported(u32),
}

impl BaudRate {
    pub const SUPPORTED: [BaudRate; 8] = [
        BaudRate(1200),
        BaudRate(2400),
        BaudRate(4800),
        BaudRate(9600),
        BaudRate(19200),
        BaudRate(38400),
        BaudRate(57600),
        BaudRate(115200),
    ];

    pub fn new(value: u32) -> Result<Self, BaudRateError> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|rate| rate.0 == value)
            .ok_or(BaudRateError::Unsupported(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Position of this rate within [`BaudRate::SUPPORTED`].
    pub fn index(self) -> usize {
        Self::SUPPORTED
            .iter()
            .position(|rate| *rate == self)
            .unwrap_or(0)
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate(115200)
    }
}

impl FromStr for BaudRate {
    type Err = BaudRateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| BaudRateError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = BaudRateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BaudRate> for u32 {
    fn from(rate: BaudRate) -> Self {
        rate.0
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_rate() {
        for rate in BaudRate::SUPPORTED {
            let parsed: BaudRate = rate.to_string().parse().unwrap();
            assert_eq!(parsed, rate);
        }
    }

    #[test]
    fn rejects_unlisted_rate() {
        assert_eq!("250000".parse::<BaudRate>(), Err(BaudRateError::Unsupported(250000)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "fast".parse::<BaudRate>(),
            Err(BaudRateError::NotANumber(_))
        ));
        assert!("".parse::<BaudRate>().is_err());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(" 9600 ".parse::<BaudRate>().unwrap().value(), 9600);
    }

    #[test]
    fn index_matches_supported_order() {
        assert_eq!(BaudRate::new(1200).unwrap().index(), 0);
        assert_eq!(BaudRate::default().index(), BaudRate::SUPPORTED.len() - 1);
    }
}
