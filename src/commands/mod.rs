//! CLI subcommands

pub mod check;
pub mod list;
pub mod search;
pub mod show;
