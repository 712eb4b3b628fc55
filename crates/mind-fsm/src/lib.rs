//! Finite-state-machine scheduler for `mind-core` states.
//!
//! Each state owns an ordered list of outgoing [`Transition`]s. Once the current state's
//! duration has elapsed, every transition with a satisfied guard becomes a candidate and one is
//! picked uniformly with the scheduler's injected RNG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod scheduler;
pub mod transition;

pub use scheduler::FsmScheduler;
pub use transition::Transition;
