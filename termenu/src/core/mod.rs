//! Deterministic, pure logic shared by the toolkit.
//!
//! Core modules must be free of I/O side effects. They operate on raw input
//! text and return deterministic outputs suitable for tests.

pub mod validate;
