//! Read-and-validate operations layered on the terminal primitives.
//!
//! [`InputOutputExt::read_validated`] is the single retry loop of the toolkit:
//! it keeps prompting until the transform accepts a line, reporting each
//! rejection as `"<error prompt>: <reason>"`. Only failures of the terminal
//! itself (closed input, broken output) are returned to the caller.

use std::collections::HashSet;
use std::fmt::Display;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::core::validate::{
    check_option, check_predicate, parse_iso_date, parse_iso_date_in_range, parse_number,
    parse_number_in_range,
};
use crate::io::terminal::InputOutput;

/// Higher-level operations available on every [`InputOutput`], including
/// `dyn InputOutput`.
pub trait InputOutputExt: InputOutput {
    /// Write `value` followed by a newline.
    fn write_line(&mut self, value: impl Display) -> Result<()> {
        self.write_string(&format!("{value}\n"))
    }

    /// Prompt until `transform` accepts the raw line. There is no attempt limit.
    #[instrument(skip(self, transform))]
    fn read_validated<T, F>(
        &mut self,
        prompt: &str,
        error_prompt: &str,
        mut transform: F,
    ) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        let mut attempt: u64 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            let raw = self.read_string(prompt)?;
            match transform(&raw) {
                Ok(value) => {
                    debug!(attempt, "input accepted");
                    return Ok(value);
                }
                Err(err) => {
                    debug!(attempt, error = %err, "input rejected");
                    self.write_line(format!("{error_prompt}: {err}"))?;
                }
            }
        }
    }

    fn read_int(&mut self, prompt: &str, error_prompt: &str) -> Result<i32> {
        self.read_validated(prompt, error_prompt, parse_number::<i32>)
    }

    fn read_long(&mut self, prompt: &str, error_prompt: &str) -> Result<i64> {
        self.read_validated(prompt, error_prompt, parse_number::<i64>)
    }

    fn read_double(&mut self, prompt: &str, error_prompt: &str) -> Result<f64> {
        self.read_validated(prompt, error_prompt, parse_number::<f64>)
    }

    /// Read a real number within `[min, max]` (both inclusive).
    fn read_number_range(
        &mut self,
        prompt: &str,
        error_prompt: &str,
        min: f64,
        max: f64,
    ) -> Result<f64> {
        self.read_validated(prompt, error_prompt, |raw| parse_number_in_range(raw, min, max))
    }

    fn read_string_predicate<P>(
        &mut self,
        prompt: &str,
        error_prompt: &str,
        predicate: P,
    ) -> Result<String>
    where
        P: Fn(&str) -> bool,
    {
        self.read_validated(prompt, error_prompt, |raw| check_predicate(raw, &predicate))
    }

    /// Accept only exact members of `options`.
    ///
    /// With an empty set no line is ever accepted; the call returns only when
    /// the terminal fails (for example at end of input).
    fn read_string_options(
        &mut self,
        prompt: &str,
        error_prompt: &str,
        options: &HashSet<String>,
    ) -> Result<String> {
        self.read_validated(prompt, error_prompt, |raw| check_option(raw, options))
    }

    fn read_iso_date(&mut self, prompt: &str, error_prompt: &str) -> Result<NaiveDate> {
        self.read_validated(prompt, error_prompt, parse_iso_date)
    }

    /// Read an ISO date within `[from, to]` (both inclusive).
    fn read_iso_date_range(
        &mut self,
        prompt: &str,
        error_prompt: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<NaiveDate> {
        self.read_validated(prompt, error_prompt, |raw| {
            parse_iso_date_in_range(raw, from, to)
        })
    }
}

impl<T: InputOutput + ?Sized> InputOutputExt for T {}
