//! Line-oriented prompts over any reader/writer pair.
//!
//! The binary wires this to locked stdin/stdout; tests feed a `Cursor`
//! and capture output in a `Vec<u8>`.

use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before an answer was given.
    #[error("Input closed while waiting for: {prompt}")]
    InputClosed { prompt: String },

    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `"<message>: "` and return the trimmed answer.
    pub fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        write!(self.output, "{}: ", message)?;
        self.read_answer(message)
    }

    /// Like [`ask`](Self::ask), but an empty answer yields `default`.
    pub fn ask_with_default(&mut self, message: &str, default: &str) -> Result<String, PromptError> {
        write!(self.output, "{} [default: {}]: ", message, default)?;
        let answer = self.read_answer(message)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Re-prompt, printing `guidance` each time, until the answer is non-empty.
    pub fn ask_required(&mut self, message: &str, guidance: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            tracing::debug!(prompt = message, "empty answer for required field");
            self.say(guidance)?;
        }
    }

    /// Empty answer means "not supplied".
    pub fn ask_optional(&mut self, message: &str) -> Result<Option<String>, PromptError> {
        let answer = self.ask(message)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    /// Yes/no question. Only the full words match, case-insensitively.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let default_word = if default { "yes" } else { "no" };
        loop {
            let answer = self
                .ask_with_default(&format!("{} (yes/no)", message), default_word)?
                .to_lowercase();
            match answer.as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => {
                    tracing::debug!(answer = %answer, "unrecognized yes/no answer");
                    self.say("Please answer yes or no.")?;
                }
            }
        }
    }

    /// Write one informational line.
    pub fn say(&mut self, line: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Consume the prompter, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, message: &str) -> Result<String, PromptError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed {
                prompt: message.to_string(),
            });
        }
        Ok(line.trim().to_string())
    }
}
