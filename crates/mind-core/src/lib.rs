//! Engine-agnostic primitives for tick-driven agent decision making.
//!
//! A [`Blackboard`] holds one agent's shared memory. [`Condition`]s read it, [`State`]s read and
//! write it, and a [`Scheduler`] decides every tick which state runs.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod brain;
pub mod condition;
pub mod error;
pub mod rng;
pub mod scheduler;
pub mod state;

pub use blackboard::{BbKey, Blackboard};
pub use brain::{Brain, BrainConfig};
pub use condition::{Condition, Predicate};
pub use error::{BlackboardError, Hook, SchedulerError};
pub use rng::{DeterministicRng, SplitMix64};
pub use scheduler::Scheduler;
pub use state::{HookResult, State, StateId, StateSet};
