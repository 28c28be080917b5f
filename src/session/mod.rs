//! Interactive logging sessions.
//!
//! A session repeatedly asks for a movement and the fields of its sets,
//! appending each set to the archive as soon as it is entered. Answers come
//! from any [`UserInterface`](crate::ui::UserInterface), so the same loop
//! drives a terminal, piped stdin, or a scripted test.

mod runner;
mod state;

pub use runner::{Session, SessionOptions, SessionSummary};
pub use state::{NextAction, SessionState};
