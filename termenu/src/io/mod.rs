//! Terminal boundary: primitives, validated reads and display style.

pub mod config;
pub mod read;
pub mod terminal;
