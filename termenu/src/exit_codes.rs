//! Stable exit codes for the `termenu` binary.

/// Session ended through an exit item, or a command succeeded.
pub const OK: i32 = 0;
/// Invalid arguments or style configuration.
pub const INVALID: i32 = 1;
/// Session aborted by a fatal error, including end of input.
pub const ABORTED: i32 = 2;
