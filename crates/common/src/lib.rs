//! Common utilities for building and using ethctl's commands.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod ens;
pub mod errors;
pub mod provider;
pub mod shell;

pub use provider::*;
pub use shell::{Shell, Verbosity};
