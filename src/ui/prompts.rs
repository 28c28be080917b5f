//! Interactive prompts.

use std::io;

use console::Term;
use dialoguer::{Confirm, Input, Select};

use crate::error::{LiftlogError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors, treating a closed or interrupted terminal as
/// the end of input.
fn map_dialoguer_err(e: dialoguer::Error) -> LiftlogError {
    let io_err: io::Error = e.into();
    match io_err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted => LiftlogError::InputClosed,
        _ => LiftlogError::Io(io_err),
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_deref()
        .map(super::parse_confirm)
        .unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    // Blank answers are meaningful (they end a session), so allow them.
    let input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result.trim().to_string()))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
        .map_err(map_dialoguer_err)?
        .ok_or(LiftlogError::InputClosed)?;

    Ok(PromptResult::String(options[selection].value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_input_closed() {
        let err = map_dialoguer_err(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "closed",
        )));
        assert!(matches!(err, LiftlogError::InputClosed));
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = map_dialoguer_err(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert!(matches!(err, LiftlogError::Io(_)));
    }
}
