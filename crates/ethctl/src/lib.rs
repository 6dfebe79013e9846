//! ethctl is a command-line tool for managing ENS domains.
//!
//! Every write command follows the same pipeline, see [`tx::execute`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod args;
pub mod client;
pub mod cmd;
pub mod context;
pub mod opts;
pub mod tx;

pub use context::Context;
