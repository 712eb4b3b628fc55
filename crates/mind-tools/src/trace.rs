#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mind_core::{BbKey, Blackboard, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TraceKind {
    /// FSM moved along a satisfied transition.
    Transition,
    /// Caller forced a state through `change_state`.
    Forced,
    /// Utility scheduler switched to a new winner.
    Selected,
    /// Utility scheduler dropped its winner because no score cleared `min_score`.
    Deselected,
}

/// A state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub kind: TraceKind,
    pub from: Option<StateId>,
    pub to: Option<StateId>,
}

impl TraceEvent {
    pub fn new(tick: u64, kind: TraceKind) -> Self {
        Self {
            tick,
            kind,
            from: None,
            to: None,
        }
    }

    pub fn with_from(mut self, from: Option<StateId>) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: Option<StateId>) -> Self {
        self.to = to;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn last(&self) -> Option<&TraceEvent> {
        self.events.last()
    }

    pub fn count(&self, kind: TraceKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new("mind.trace.log");
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new("mind.trace.sink");

/// Records `event` wherever the blackboard asks for it. A no-op when neither key is present.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Ok(log) = blackboard.fetch_mut(TRACE_LOG) {
        log.push(event);
    }
    if let Ok(sink) = blackboard.fetch_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
