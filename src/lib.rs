pub mod cli;
pub mod config;
pub mod diff;
pub mod errors;
pub mod output;
pub mod spec;
