// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The command needs an existing record and none was supplied.
    MissingCurrentState {
        /// The command that was applied.
        command: &'static str,
    },
    /// The command creates a record but one was supplied.
    UnexpectedCurrentState {
        /// The command that was applied.
        command: &'static str,
    },
    /// The command only applies to recurring masters.
    NotRecurringMaster(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::MissingCurrentState { command } => {
                write!(f, "{command} requires an existing record")
            }
            Self::UnexpectedCurrentState { command } => {
                write!(f, "{command} cannot be applied to an existing record")
            }
            Self::NotRecurringMaster(id) => {
                write!(f, "Tournament {id} is not a recurring master")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
