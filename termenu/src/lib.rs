//! Text-console interaction toolkit: validated input and nested menus.
//!
//! The crate is split the same way as the interaction itself:
//!
//! - **[`core`]**: Pure transforms that turn a raw input line into a value or a
//!   user-facing rejection reason. No I/O, fully testable in isolation.
//! - **[`io`]**: The terminal boundary. [`io::terminal::InputOutput`] has two
//!   primitives; [`io::read::InputOutputExt`] adds the retry loop and typed
//!   readers on top of them.
//!
//! [`item`] and [`menu`] build the navigation tree on the terminal boundary:
//! a [`menu::Menu`] lists its items, reads a valid selection and runs it until
//! an exit item is chosen.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod item;
pub mod logging;
pub mod menu;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
