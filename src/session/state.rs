//! Session loop states.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Movement;

/// Where the session loop is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Asking which movement to log.
    AwaitingMovement,
    /// Asking for the fields of the next set of a movement.
    AwaitingSetFields(Movement),
    /// A set was logged; asking what comes next.
    ConfirmOrRepeat(Movement),
    /// The session is over.
    Done,
}

impl SessionState {
    /// Check whether the loop should stop.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Answer to "what next?" after a set is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Another set of the same movement.
    Same,
    /// Pick a different movement.
    New,
    /// End the session.
    Done,
}

impl NextAction {
    /// Every action, in menu order.
    pub const ALL: [NextAction; 3] = [Self::Same, Self::New, Self::Done];

    /// Value used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::New => "new",
            Self::Done => "done",
        }
    }

    /// Menu label, naming the current movement where it helps.
    pub fn label(&self, movement: &Movement) -> String {
        match self {
            Self::Same => format!("Another set of {}", movement.name),
            Self::New => "Different movement".to_string(),
            Self::Done => "Finish session".to_string(),
        }
    }
}

impl FromStr for NextAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "same" | "s" | "again" | "repeat" => Ok(Self::Same),
            "new" | "n" | "next" | "movement" => Ok(Self::New),
            "done" | "d" | "q" | "quit" | "finish" => Ok(Self::Done),
            other => Err(format!(
                "unknown choice '{}' (expected same, new or done)",
                other
            )),
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words that end the session when typed at the movement prompt.
pub(crate) fn is_stop_word(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "done" | "q" | "quit" | "exit"
    )
}
