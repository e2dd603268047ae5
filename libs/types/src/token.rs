//! Token metadata and allowances
//!
//! `TokenInfo` describes an ERC20 token (collateral or synthetic).
//! `Allowance` captures how much of it the EMP contract may pull from the
//! sponsor's wallet. The built-in mainnet collateral list lets the UI label
//! collateral currencies without an extra metadata lookup.

use crate::errors::AmountError;
use crate::ids::Address;
use crate::numeric::TokenAmount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// `2^256 - 1`, the allowance set by a "max approve".
pub const MAX_UINT256: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// ERC20 token metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    /// Whether the token is on UMA's collateral whitelist
    pub whitelisted: bool,
}

impl TokenInfo {
    /// Create token metadata
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
        whitelisted: bool,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            whitelisted,
        }
    }
}

/// Spending allowance granted to the EMP contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Allowance {
    /// Max approval; never needs topping up
    Unlimited,
    /// A finite approval
    Limited(TokenAmount),
}

impl Allowance {
    /// Parse the raw `allowance(owner, spender)` result.
    ///
    /// `2^256 - 1`, or any value too large for 128 bits, is treated as
    /// unlimited.
    pub fn from_wei_str(input: &str, decimals: u8) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed == MAX_UINT256 {
            // still validate the decimals so both branches agree on errors
            TokenAmount::zero(decimals)?;
            return Ok(Allowance::Unlimited);
        }

        match trimmed.parse::<u128>() {
            Ok(wei) => Ok(Allowance::Limited(TokenAmount::new(wei, decimals)?)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                TokenAmount::zero(decimals)?;
                Ok(Allowance::Unlimited)
            }
            Err(_) => Err(AmountError::InvalidWei { input: input.to_string() }),
        }
    }

    /// Check if the allowance covers `amount` (in display units).
    ///
    /// A finite allowance too large to express as a `Decimal` covers any
    /// amount the UI can express.
    pub fn covers(&self, amount: Decimal) -> bool {
        match self {
            Allowance::Unlimited => true,
            Allowance::Limited(limit) => match limit.to_decimal() {
                Ok(limit) => limit >= amount,
                Err(_) => true,
            },
        }
    }

    /// Check if this is a max approval
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Allowance::Unlimited)
    }
}

// ---------------------------------------------------------------------------
// Built-in mainnet collateral list
// ---------------------------------------------------------------------------

/// (address, decimals, whitelisted, name, symbol)
const MAINNET_COLLATERALS: &[(&str, u8, bool, &str, &str)] = &[
    ("0x04fa0d235c4abf4bcf4787af4cf447de572ef828", 18, false, "UMA Voting Token v1", "UMA"),
    ("0x1f9840a85d5af5bf1d1762f925bdaddc4201f984", 18, false, "Uniswap", "UNI"),
    ("0x514910771af9ca656af840dff83e8264ecf986ca", 18, false, "ChainLink Token", "LINK"),
    ("0x6b175474e89094c44da98b954eedeac495271d0f", 18, true, "Dai Stablecoin", "DAI"),
    ("0x7fc66500c84a76ad7e9c93437bfc5ac33e2ddae9", 18, false, "Aave Token", "AAVE"),
    ("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", 6, false, "USD Coin", "USDC"),
    ("0xc011a73ee8576fb46f5e1c5751ca3b9fe0af2a6f", 18, false, "Synthetix Network Token", "SNX"),
    ("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", 18, false, "Wrapped Ether", "WETH"),
    ("0xeb4c2781e4eba804ce9a9803c67d0893436bb27d", 8, false, "renBTC", "renBTC"),
    ("0xeca82185adce47f39c684352b0439f030f860318", 18, false, "Perlin", "PERL"),
];

/// Known mainnet collateral tokens.
pub fn mainnet_collaterals() -> Vec<TokenInfo> {
    MAINNET_COLLATERALS
        .iter()
        .filter_map(|&(address, decimals, whitelisted, name, symbol)| {
            Address::parse(address)
                .ok()
                .map(|address| TokenInfo::new(address, symbol, name, decimals, whitelisted))
        })
        .collect()
}

/// Only the collateral tokens on UMA's whitelist.
pub fn whitelisted_collaterals() -> Vec<TokenInfo> {
    mainnet_collaterals().into_iter().filter(|t| t.whitelisted).collect()
}

/// Look up a known collateral by address.
pub fn find_collateral_by_address(address: &Address) -> Option<TokenInfo> {
    mainnet_collaterals().into_iter().find(|t| t.address == *address)
}

/// Look up a known collateral by symbol (case-insensitive).
pub fn find_collateral_by_symbol(symbol: &str) -> Option<TokenInfo> {
    mainnet_collaterals()
        .into_iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}
