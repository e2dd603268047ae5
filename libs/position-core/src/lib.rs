//! Position Core: Client Computation Layer
//!
//! Provides deterministic, client-side computation for an EMP sponsor
//! position:
//! - Collateral ratios, liquidation price and mint eligibility (`risk`)
//! - Max-tokens / min-collateral guided input (`suggest`)
//! - Form previews for mint, deposit, withdraw and redeem
//!
//! # Determinism
//! All functions are pure: no system time, no RNG, no external calls.
//! Uses `Decimal` (fixed-point) throughout; the evaluation time is part of
//! the caller's `PositionContext`.
//!
//! # Version
//! v1.0.0

pub mod config;
pub mod risk;
pub mod suggest;
pub mod context;
pub mod mint;
pub mod deposit;
pub mod withdraw;
pub mod redeem;

/// Crate version constant
pub const POSITION_CORE_VERSION: &str = "1.0.0";
