use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::domain::{parse_amount, Cents, TransactionId};

/// Raised when the input stream ends while a prompt is waiting.
#[derive(Error, Debug)]
#[error("input closed")]
pub struct InputClosed;

/// Line-oriented input and output used by the command loop.
pub trait Console {
    /// Show `label` and read one line. Returns `None` at end of input.
    fn read_line(&mut self, label: &str) -> std::io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> std::io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, label: &str) -> std::io::Result<Option<String>> {
        (**self).read_line(label)
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        (**self).write_line(line)
    }
}

/// [`Console`] over any reader/writer pair, usually stdin and stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn read_line(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{} ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

/// Ask for free text. An empty answer falls back to `default` when one is given.
pub fn ask<C: Console + ?Sized>(console: &mut C, label: &str, default: Option<&str>) -> Result<String> {
    let label = match default {
        Some(default) => format!("{} ({}):", label, default),
        None => format!("{}:", label),
    };
    let answer = console
        .read_line(&label)
        .context("Failed to read input")?
        .ok_or(InputClosed)?;
    let answer = answer.trim();

    Ok(match default {
        Some(default) if answer.is_empty() => default.to_string(),
        _ => answer.to_string(),
    })
}

/// Ask until the answer is one of `choices` (case-insensitive).
pub fn ask_choice<C: Console + ?Sized>(
    console: &mut C,
    label: &str,
    choices: &[&str],
    default: &str,
) -> Result<String> {
    let label = format!("{} [{}]", label, choices.join("/"));
    loop {
        let answer = ask(console, &label, Some(default))?.to_lowercase();
        if choices.contains(&answer.as_str()) {
            return Ok(answer);
        }
        say(console, "Please select one of the available options")?;
    }
}

/// Ask until the answer parses as an amount. An empty answer means 0.
pub fn ask_amount<C: Console + ?Sized>(console: &mut C, label: &str) -> Result<Cents> {
    loop {
        let answer = ask(console, label, Some("0"))?;
        match parse_amount(&answer) {
            Ok(cents) => return Ok(cents),
            Err(_) => say(console, "Please enter a valid number")?,
        }
    }
}

/// Ask until the answer parses as a transaction id.
pub fn ask_id<C: Console + ?Sized>(console: &mut C, label: &str) -> Result<TransactionId> {
    loop {
        let answer = ask(console, label, None)?;
        match answer.parse() {
            Ok(id) => return Ok(id),
            Err(_) => say(console, "Please enter a valid integer")?,
        }
    }
}

/// Write one line of output.
pub fn say<C: Console + ?Sized>(console: &mut C, line: impl AsRef<str>) -> Result<()> {
    console
        .write_line(line.as_ref())
        .context("Failed to write output")
}
