//! Clipboard fallback chain.
//!
//! Copying is attempted with each strategy in order until one succeeds. Only
//! when every strategy has failed does the caller hear about it, once, as
//! [`ClipboardError::Exhausted`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("{strategy}: {reason}")]
    Failed { strategy: String, reason: String },

    #[error("Copy failed: no clipboard strategy succeeded, copy the text manually")]
    Exhausted,
}

impl ClipboardError {
    fn failed(strategy: &str, reason: impl ToString) -> Self {
        Self::Failed {
            strategy: strategy.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// One way of getting text onto the user's clipboard.
pub trait ClipboardStrategy {
    fn name(&self) -> &str;

    /// Copies `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if this strategy is unavailable or the copy failed.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes the text into a system clipboard utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboard {
    /// Known utilities, in the order they are tried.
    pub const KNOWN: [Self; 5] = [
        Self::new("wl-copy", &[]),
        Self::new("xclip", &["-selection", "clipboard"]),
        Self::new("xsel", &["--clipboard", "--input"]),
        Self::new("pbcopy", &[]),
        Self::new("clip.exe", &[]),
    ];

    #[must_use]
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|c| c.program == name)
    }
}

impl ClipboardStrategy for CommandClipboard {
    fn name(&self) -> &str {
        self.program
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::failed(self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::failed(self.program, e))?;
        }

        let status = child.wait().map_err(|e| ClipboardError::failed(self.program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::failed(self.program, format!("exited with {status}")))
        }
    }
}

/// Asks the terminal to set the clipboard through an OSC 52 escape.
///
/// Only attempted when stdout is a terminal; the escape would otherwise end up
/// in a pipe or file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

impl ClipboardStrategy for Osc52Clipboard {
    fn name(&self) -> &str {
        "osc52"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::failed("osc52", "stdout is not a terminal"));
        }
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| ClipboardError::failed("osc52", e))
    }
}

/// The OSC 52 "set clipboard" escape for `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Ordered list of strategies tried until one succeeds.
#[derive(Default)]
pub struct ClipboardChain {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl std::fmt::Debug for ClipboardChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.name()))
            .finish()
    }
}

impl ClipboardChain {
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds a chain from configured names.
    ///
    /// `system` expands to every known clipboard utility, `osc52` is the
    /// terminal escape, and a utility may also be named directly (`xclip`).
    /// Unknown names are skipped.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut strategies: Vec<Box<dyn ClipboardStrategy>> = Vec::new();
        for name in names {
            match name.as_ref() {
                "system" => strategies.extend(
                    CommandClipboard::KNOWN
                        .into_iter()
                        .map(|c| Box::new(c) as Box<dyn ClipboardStrategy>),
                ),
                "osc52" => strategies.push(Box::new(Osc52Clipboard)),
                other => match CommandClipboard::by_name(other) {
                    Some(command) => strategies.push(Box::new(command)),
                    None => tracing::debug!(strategy = other, "unknown clipboard strategy skipped"),
                },
            }
        }
        Self { strategies }
    }

    pub fn push(&mut self, strategy: Box<dyn ClipboardStrategy>) {
        self.strategies.push(strategy);
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Copies with the first strategy that works and returns its name.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::Exhausted`] once every strategy has failed.
    pub fn copy(&mut self, text: &str) -> Result<String, ClipboardError> {
        for strategy in &mut self.strategies {
            match strategy.copy(text) {
                Ok(()) => {
                    tracing::debug!(strategy = strategy.name(), "copied to clipboard");
                    return Ok(strategy.name().to_string());
                }
                Err(e) => tracing::debug!(error = %e, "clipboard strategy failed"),
            }
        }
        tracing::warn!(tried = self.strategies.len(), "all clipboard strategies failed");
        Err(ClipboardError::Exhausted)
    }
}
