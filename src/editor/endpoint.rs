//! Collecting one endpoint section from the user.

use std::io::{BufRead, Write};

use crate::config::Endpoint;
use crate::prompt::{PromptError, Prompter};

/// URL-step keyword that switches to picking an already-used URL.
pub const REUSE_URL_KEYWORD: &str = "/existed";

/// Outcome of parsing a numbered-list selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the list.
    Index(usize),
    Invalid,
}

/// Parse a 1-based selection among `count` items. Only plain ASCII digits
/// are accepted.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Selection::Invalid;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Index(n - 1),
        _ => Selection::Invalid,
    }
}

pub(super) fn collect<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    existing_urls: &[String],
) -> Result<Endpoint, PromptError> {
    let name = prompter.ask_required(
        "Enter endpoint name (required)",
        "Endpoint name is required. Please enter it.",
    )?;
    let port = prompter.ask_required("Enter port (required)", "Port is required. Please enter it.")?;
    let protocol = prompter.ask_optional("Enter protocol (optional)")?;
    let url = ask_url(prompter, existing_urls)?;
    let description = prompter.ask_optional("Enter description (optional)")?;

    Ok(Endpoint::new(name, port)
        .with_protocol(protocol)
        .with_url(url)
        .with_description(description))
}

/// The three-way URL step: blank, `/existed`, or a literal URL.
fn ask_url<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    existing_urls: &[String],
) -> Result<Option<String>, PromptError> {
    let message = if existing_urls.is_empty() {
        "Enter URL (optional)".to_string()
    } else {
        format!(
            "Enter URL (optional) or type {} to choose from existing",
            REUSE_URL_KEYWORD
        )
    };

    loop {
        let answer = prompter.ask(&message)?;
        if answer.is_empty() {
            return Ok(None);
        }
        // The keyword only means "reuse" when there is something to reuse.
        if answer != REUSE_URL_KEYWORD || existing_urls.is_empty() {
            return Ok(Some(answer));
        }

        prompter.say("Select an existing URL:")?;
        for (idx, url) in existing_urls.iter().enumerate() {
            prompter.say(&format!("{}. {}", idx + 1, url))?;
        }
        let choice = prompter.ask("Enter the number of the URL you want to use")?;
        match parse_selection(&choice, existing_urls.len()) {
            Selection::Index(idx) => return Ok(Some(existing_urls[idx].clone())),
            Selection::Invalid => {
                tracing::warn!(choice = %choice, available = existing_urls.len(), "invalid URL selection");
                prompter.say("Invalid selection. Please try again.")?;
            }
        }
    }
}
