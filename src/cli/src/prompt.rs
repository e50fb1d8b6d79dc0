//! Line-based console prompts with typed coercions.

use crate::errors::WalletError;
use chrono::{DateTime, Datelike, NaiveDate};
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Responses accepted as a yes.
const TRUE_WORDS: [&str; 4] = ["true", "t", "yes", "y"];

/// Date layouts accepted besides RFC 3339.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Reads answers from `R` and writes questions to `W`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stdout> {
    /// Creates a prompt bound to the process console.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Creates a prompt over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Writes one line of user-facing output.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), WalletError> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Asks `label` and returns the trimmed answer, or `default` when the answer is empty.
    pub fn prompt(&mut self, label: &str, default: Option<&str>) -> Result<String, WalletError> {
        match default {
            Some(value) => write!(self.output, "{} [{}]: ", label, value)?,
            None => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed").into());
        }

        let answer = line.trim();
        match default {
            Some(value) if answer.is_empty() => Ok(value.to_string()),
            _ => Ok(answer.to_string()),
        }
    }

    /// Asks until the answer parses as an integer, rejecting negatives when `positive_only`.
    pub fn prompt_int(
        &mut self,
        label: &str,
        default: Option<i64>,
        positive_only: bool,
    ) -> Result<i64, WalletError> {
        let default = default.map(|value| value.to_string());
        loop {
            let answer = self.prompt(label, default.as_deref())?;
            match answer.parse::<i64>() {
                Ok(value) if !positive_only || value >= 0 => return Ok(value),
                _ => self.say(format!("'{}' is not a valid number", answer))?,
            }
        }
    }

    /// Asks a yes/no question. Anything that is not a recognised yes is a no.
    pub fn prompt_bool(&mut self, label: &str, default: bool) -> Result<bool, WalletError> {
        let answer = self.prompt(label, Some(default.to_string().as_str()))?;
        Ok(TRUE_WORDS.contains(&answer.to_lowercase().as_str()))
    }

    /// Asks until the answer parses as a date and returns it as `M/D/YYYY`.
    pub fn prompt_date(
        &mut self,
        label: &str,
        default: Option<&str>,
    ) -> Result<String, WalletError> {
        loop {
            let answer = self.prompt(label, default)?;
            match parse_date(&answer) {
                Some(date) => return Ok(format!("{}/{}/{}", date.month(), date.day(), date.year())),
                None => self.say(format!("'{}' is not a valid date", answer))?,
            }
        }
    }

    /// Asks for an index into a list of `len` items, skipping `exclude`.
    pub fn prompt_index(
        &mut self,
        label: &str,
        len: usize,
        exclude: Option<usize>,
    ) -> Result<usize, WalletError> {
        loop {
            let index = self.prompt_int(label, None, true)? as usize;
            if index >= len {
                self.say(format!("Index must be between 0 and {}", len.saturating_sub(1)))?;
            } else if Some(index) == exclude {
                self.say(format!("Index {} is already selected", index))?;
            } else {
                return Ok(index);
            }
        }
    }
}

fn parse_date(answer: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(answer, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(answer).ok().map(|dt| dt.date_naive()))
}
