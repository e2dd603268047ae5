//! Fixed-point token amounts
//!
//! On chain every ERC20 amount is an integer number of base units ("wei")
//! scaled by `10^decimals`. `TokenAmount` keeps that representation and only
//! converts to `Decimal` at the display boundary. Uses rust_decimal for the
//! conversion so no floating-point error is ever introduced.

use crate::errors::AmountError;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported token decimals (rust_decimal's maximum scale).
pub const MAX_DECIMALS: u8 = 28;

/// Decimals used by UMA's `FixedPoint` values (ratios, requirements).
pub const FIXED_POINT_DECIMALS: u8 = 18;

/// Largest mantissa a `Decimal` can hold (96 bits).
const MAX_MANTISSA: u128 = (1u128 << 96) - 1;

/// Token amount in base units with its decimal scaling.
///
/// `wei` is serialized as a decimal string, since JSON numbers cannot carry
/// 128-bit integers losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAmount {
    #[serde(with = "wei_string")]
    wei: u128,
    decimals: u8,
}

impl TokenAmount {
    /// Create from a raw wei value
    pub fn new(wei: u128, decimals: u8) -> Result<Self, AmountError> {
        check_decimals(decimals)?;
        Ok(Self { wei, decimals })
    }

    /// Zero amount with the given decimals
    pub fn zero(decimals: u8) -> Result<Self, AmountError> {
        Self::new(0, decimals)
    }

    /// Parse a raw wei string as returned by a contract call
    pub fn from_wei_str(input: &str, decimals: u8) -> Result<Self, AmountError> {
        let wei = input
            .trim()
            .parse::<u128>()
            .map_err(|_| AmountError::InvalidWei { input: input.to_string() })?;
        Self::new(wei, decimals)
    }

    /// Parse a user-entered decimal string ("1.5", "0.000001").
    ///
    /// Fractional digits beyond the token's decimals are truncated, never
    /// rounded up, so the submitted amount never exceeds what was typed.
    pub fn parse(input: &str, decimals: u8) -> Result<Self, AmountError> {
        let value = Decimal::from_str(input.trim())
            .or_else(|_| Decimal::from_scientific(input.trim()))
            .map_err(|_| AmountError::InvalidAmount { input: input.to_string() })?;
        Self::from_decimal_truncating(value, decimals)
    }

    /// Convert a decimal to base units, truncating extra precision.
    pub fn from_decimal_truncating(value: Decimal, decimals: u8) -> Result<Self, AmountError> {
        check_decimals(decimals)?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative { value: value.to_string() });
        }

        let truncated = value.round_dp_with_strategy(decimals as u32, RoundingStrategy::ToZero);
        let mantissa = u128::try_from(truncated.mantissa()).map_err(|_| AmountError::Overflow)?;
        let shift = decimals as u32 - truncated.scale();
        let wei = 10u128
            .checked_pow(shift)
            .and_then(|factor| mantissa.checked_mul(factor))
            .ok_or(AmountError::Overflow)?;

        Ok(Self { wei, decimals })
    }

    /// Raw base units
    pub fn wei(&self) -> u128 {
        self.wei
    }

    /// Token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Check if amount is zero
    pub fn is_zero(&self) -> bool {
        self.wei == 0
    }

    /// Convert to a display decimal (`wei / 10^decimals`)
    ///
    /// Values wider than a `Decimal` mantissa lose their low-order wei
    /// digits (truncated toward zero). Fails only when the integer part
    /// itself does not fit.
    pub fn to_decimal(&self) -> Result<Decimal, AmountError> {
        let mut mantissa = self.wei;
        let mut scale = self.decimals as u32;
        while mantissa > MAX_MANTISSA {
            if scale == 0 {
                return Err(AmountError::Overflow);
            }
            mantissa /= 10;
            scale -= 1;
        }
        Ok(Decimal::from_i128_with_scale(mantissa as i128, scale).normalize())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(value) => write!(f, "{}", value),
            Err(_) => write!(f, "{}e-{}", self.wei, self.decimals),
        }
    }
}

fn check_decimals(decimals: u8) -> Result<(), AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals { decimals });
    }
    Ok(())
}

/// Serialize `u128` wei values as decimal strings.
pub(crate) mod wei_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map_err(D::Error::custom)
    }
}
