//! Tooling primitives for observing mind schedulers.
//!
//! Schedulers report state changes as [`TraceEvent`]s through the agent's blackboard, so a host
//! opts in by storing a [`TraceLog`] or a [`TraceSink`] under the well-known keys.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceKind, TraceLog, TraceSink, VecTraceSink, TRACE_LOG,
    TRACE_SINK,
};
