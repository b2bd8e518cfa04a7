//! Test-only terminal and item doubles.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::terminal::InputOutput;
use crate::item::{ActionError, ActionResult, Item};

/// Terminal fed from a preloaded input queue, capturing everything written.
///
/// Prompts are recorded separately from output so assertions on `lines()`
/// only see what the code under test wrote. Once the queue is exhausted,
/// reads fail with `UnexpectedEof` like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: String,
}

impl ScriptedIo {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn lines(&self) -> Vec<String> {
        self.output.lines().map(str::to_string).collect()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl InputOutput for ScriptedIo {
    fn read_string(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
            .context("input closed while waiting for a line")
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}

/// Shared, ordered record of which items ran.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn record(&self, name: &str) {
        self.0.borrow_mut().push(name.to_string());
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Recoverable(String),
    Fatal(String),
}

/// Leaf item that appends its name to a [`CallLog`] each time it runs.
#[derive(Debug, Clone)]
pub struct RecordingItem {
    name: String,
    log: CallLog,
    exit: bool,
    failure: Option<Failure>,
}

impl RecordingItem {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            exit: false,
            failure: None,
        }
    }

    pub fn exiting(mut self) -> Self {
        self.exit = true;
        self
    }

    pub fn failing_recoverably(mut self, message: &str) -> Self {
        self.failure = Some(Failure::Recoverable(message.to_string()));
        self
    }

    pub fn failing_fatally(mut self, message: &str) -> Self {
        self.failure = Some(Failure::Fatal(message.to_string()));
        self
    }
}

impl Item for RecordingItem {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn perform(&self, _io: &mut dyn InputOutput) -> ActionResult {
        self.log.record(&self.name);
        match &self.failure {
            None => Ok(()),
            Some(Failure::Recoverable(message)) => Err(ActionError::recoverable(message.clone())),
            Some(Failure::Fatal(message)) => Err(ActionError::Fatal(anyhow!("{message}"))),
        }
    }

    fn is_exit(&self) -> bool {
        self.exit
    }
}

/// Write `contents` to `style.toml` inside a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_style_file(contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("style.toml");
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
