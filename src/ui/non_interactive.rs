//! Line-oriented UI for piped input and scripts.

use std::io::{self, BufRead, Write};

use crate::error::{LiftlogError, Result};

use super::{parse_confirm, OutputMode, Prompt, PromptOption, PromptResult, PromptType, UserInterface};

/// UI implementation that reads one line of input per prompt.
///
/// An empty line takes the prompt's default. End of input ends the
/// conversation with `InputClosed`.
pub struct NonInteractiveUI {
    mode: OutputMode,
    input: Box<dyn BufRead>,
}

impl NonInteractiveUI {
    /// Create a UI reading from stdin.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_input(mode, io::stdin().lock())
    }

    /// Create a UI reading from an arbitrary source (for testing).
    pub fn with_input(mode: OutputMode, input: impl BufRead + 'static) -> Self {
        Self {
            mode,
            input: Box::new(input),
        }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            tracing::debug!("Prompt input closed");
            return Err(LiftlogError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

/// Text shown before reading the answer to a prompt.
///
/// Select prompts list their options numbered from 1.
fn render_prompt(prompt: &Prompt) -> String {
    let mut text = String::new();
    if let PromptType::Select { options } = &prompt.prompt_type {
        text.push_str(&prompt.question);
        text.push('\n');
        for (i, opt) in options.iter().enumerate() {
            text.push_str(&format!("  {}) {}\n", i + 1, opt.label));
        }
        text.push_str("Choice");
    } else {
        text.push_str(&prompt.question);
    }
    match (&prompt.prompt_type, prompt.default.as_deref()) {
        (PromptType::Confirm, default) => {
            let yes = default.map(parse_confirm).unwrap_or(false);
            text.push_str(if yes { " [Y/n]" } else { " [y/N]" });
        }
        (_, Some(default)) if !default.is_empty() => {
            text.push_str(&format!(" [{}]", default));
        }
        _ => {}
    }
    text.push_str(": ");
    text
}

/// Match an answer against select options by value, label or 1-based index.
fn pick_option(answer: &str, options: &[PromptOption]) -> Option<String> {
    if let Some(opt) = options.iter().find(|o| o.value == answer) {
        return Some(opt.value.clone());
    }
    if let Some(opt) = options.iter().find(|o| o.label.eq_ignore_ascii_case(answer)) {
        return Some(opt.value.clone());
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| options.get(idx))
        .map(|o| o.value.clone())
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_results() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_results() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        // Prompts go to stderr so stdout stays parseable.
        let mut stderr = io::stderr();
        write!(stderr, "{}", render_prompt(prompt))?;
        stderr.flush()?;

        let answer = self.read_answer()?;
        let answer = if answer.is_empty() {
            prompt.default.clone().unwrap_or_default()
        } else {
            answer
        };
        tracing::debug!("Prompt '{}' answered '{}'", prompt.key, answer);

        Ok(match &prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(&answer)),
            PromptType::Input => PromptResult::String(answer),
            PromptType::Select { options } => {
                PromptResult::String(pick_option(&answer, options).unwrap_or(answer))
            }
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
