//! CLI subcommands.

pub mod contracts;
pub mod execute;
