//! Library components of the `roster` command.

pub mod config;
pub mod logging;
pub mod pipeline;
