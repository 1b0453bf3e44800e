// src/exit.rs
//! Process exit codes for `scanlens`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::ScanlensError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ScanlensExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, serialization).
    Error = 1,
    /// The report or config could not be decoded.
    InvalidInput = 2,
    /// `--fail-on-violations` was set and violations remain after filtering.
    ViolationsFound = 3,
}

impl ScanlensExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed run.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ScanlensError>() {
            Some(ScanlensError::Decode(_) | ScanlensError::Config { .. }) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for ScanlensExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_invalid_input() {
        let err = anyhow::Error::new(ScanlensError::Decode("bad".into()));
        assert_eq!(ScanlensExit::for_error(&err), ScanlensExit::InvalidInput);
    }

    #[test]
    fn other_errors_are_generic() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(ScanlensExit::for_error(&err), ScanlensExit::Error);
        assert_eq!(ScanlensExit::ViolationsFound.code(), 3);
    }
}
