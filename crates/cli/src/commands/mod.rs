//! CLI subcommands

pub mod demo;
pub mod report;
