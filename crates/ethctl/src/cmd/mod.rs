//! Subcommands of the `ethctl` binary.

pub mod ens;
