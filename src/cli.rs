use crate::error::SelectionError;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::num::{IntErrorKind, ParseIntError};

/// Iller5 Content Factory: generate multiple-choice flashcards with an LLM.
///
/// Everything else is asked for interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {}

/// Maps a 1-based menu number onto an index into a list of `len` entries.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    let out_of_range = || SelectionError::OutOfRange {
        value: trimmed.to_string(),
        max: len,
    };
    let value: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => SelectionError::NotANumber(trimmed.to_string()),
    })?;
    if value < 1 || value as u64 > len as u64 {
        return Err(out_of_range());
    }
    Ok(value as usize - 1)
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// `None` once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prints a numbered menu and keeps asking until a valid entry is picked.
    pub fn select(&mut self, prompt: &str, entries: &[String]) -> io::Result<Option<usize>> {
        for (i, entry) in entries.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, entry)?;
        }
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_selection(&answer, entries.len()) {
                Ok(index) => return Ok(Some(index)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    /// Free-text answer; re-asks while `validate` rejects it.
    pub fn ask_valid(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<(), String>,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            let answer = answer.trim().to_string();
            match validate(&answer) {
                Ok(()) => return Ok(Some(answer)),
                Err(message) => self.say(&message)?,
            }
        }
    }

    /// Only `y`/`yes` count as yes.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(self
            .ask(prompt)?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")))
    }
}
