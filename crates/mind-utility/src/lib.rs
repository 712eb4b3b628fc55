//! Utility AI selection over `mind-core` states.
//!
//! On every update each option is scored against the blackboard and the highest-scoring state
//! runs. Tie-breaking is stable by registration order.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod scheduler;

pub use scheduler::{LifecyclePolicy, UtilityConfig, UtilityScheduler};
