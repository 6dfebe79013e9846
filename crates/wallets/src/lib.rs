//! # ethctl-wallets
//!
//! Utilities for locating and unlocking the signer that owns an ENS name.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub mod utils;
mod wallet;

pub use error::{PrivateKeyError, WalletSignerError};
pub use wallet::WalletOpts;
