//! Terminal abstraction for all user interaction.
//!
//! The [`InputOutput`] trait reduces the physical medium to two primitives:
//! read one line after a prompt, and write text. Everything else (typed
//! readers, menus) is built on top of these, so tests can swap in a scripted
//! terminal without touching stdin/stdout.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Two-primitive contract every terminal adapter provides.
pub trait InputOutput {
    /// Emit `prompt` and return the next full line without its terminator.
    ///
    /// End of input is an error (`io::ErrorKind::UnexpectedEof`), never an
    /// empty line.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a garbled
    /// line is handed to validation like any other text.
    fn read_string(&mut self, prompt: &str) -> Result<String>;

    /// Emit `text` as-is, without appending a newline.
    fn write_string(&mut self, text: &str) -> Result<()>;
}

/// Terminal adapter over any buffered reader and writer.
///
/// Prompts are written as `"<prompt>: "` and flushed before blocking on input.
pub struct StreamIo<R, W> {
    reader: R,
    writer: W,
}

/// The process console: stdin in, stdout out.
pub type ConsoleIo = StreamIo<BufReader<Stdin>, Stdout>;

impl ConsoleIo {
    pub fn console() -> Self {
        StreamIo::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> StreamIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the adapter, returning the writer (useful to inspect captured output).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> InputOutput for StreamIo<R, W> {
    #[instrument(skip(self))]
    fn read_string(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}: ").context("write prompt")?;
        self.writer.flush().context("flush prompt")?;

        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .context("read input line")?;
        if read == 0 {
            debug!("input stream closed");
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof))
                .context("input closed while waiting for a line");
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .context("write output")?;
        self.writer.flush().context("flush output")
    }
}
