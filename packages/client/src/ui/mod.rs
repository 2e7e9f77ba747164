//! Interactive shell used by the client binary.

pub mod command;
pub mod shell;

pub use command::{Command, CommandError};
pub use shell::{Outcome, execute};
