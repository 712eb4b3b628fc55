use core::fmt;

use thiserror::Error;

use crate::StateId;

/// Lookup failures on a [`crate::Blackboard`]. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard key `{key}` not found")]
    KeyNotFound { key: String },

    #[error("blackboard key `{key}` holds `{found}`, requested `{expected}`")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl BlackboardError {
    pub fn key(&self) -> &str {
        match self {
            BlackboardError::KeyNotFound { key } => key,
            BlackboardError::TypeMismatch { key, .. } => key,
        }
    }
}

/// Lifecycle hook of a [`crate::State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Enter,
    Update,
    Exit,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hook::Enter => "enter",
            Hook::Update => "update",
            Hook::Exit => "exit",
        })
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("state {0} is not registered with this scheduler")]
    UnknownState(StateId),

    /// A consumer hook failed. The scheduler does not roll back the partially applied change.
    #[error("state `{state}` failed in {hook}")]
    Behavior {
        state: String,
        hook: Hook,
        #[source]
        source: anyhow::Error,
    },
}

impl SchedulerError {
    pub fn hook(&self) -> Option<Hook> {
        match self {
            SchedulerError::Behavior { hook, .. } => Some(*hook),
            SchedulerError::UnknownState(_) => None,
        }
    }
}
