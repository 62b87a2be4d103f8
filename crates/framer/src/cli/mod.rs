//! CLI command implementations.

pub mod config;
pub mod prompter;
pub mod questions;
pub mod run;
pub mod theme;
