//! CLI subcommands

pub mod helpers;
pub mod lower;
