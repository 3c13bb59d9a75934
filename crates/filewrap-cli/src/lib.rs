//! CLI library components for filewrap.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
