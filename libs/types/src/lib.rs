//! Types library for the EMP position manager
//!
//! This library provides the value records shared by the position manager's
//! computation layer and the UI that renders it. Every type is plain data:
//! constructed fresh from a chain snapshot, never mutated in place.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Contract and token addresses
//! - `numeric`: Fixed-point token amounts (wei + decimals)
//! - `token`: Token metadata, allowances, built-in collateral list
//! - `position`: Sponsor position snapshots
//! - `emp`: Expiring Multi Party contract parameters and totals
//! - `risk`: Calculator inputs and results
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod token;
pub mod position;
pub mod emp;
pub mod risk;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::token::*;
    pub use crate::position::*;
    pub use crate::emp::*;
    pub use crate::risk::*;
    pub use crate::errors::*;
}
