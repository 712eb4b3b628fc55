use mind_core::{
    Blackboard, Condition, DeterministicRng, Scheduler, SchedulerError, SplitMix64, State,
    StateId, StateSet,
};
use mind_tools::{emit as trace_emit, TraceEvent, TraceKind};

use crate::Transition;

/// Transition-graph scheduler.
///
/// The machine starts unset and never starts itself: call [`FsmScheduler::change_state`] to pick
/// the initial state. Until then `update` is a no-op.
pub struct FsmScheduler<R = SplitMix64>
where
    R: DeterministicRng + 'static,
{
    states: StateSet,
    // Parallel to `states`, indexed by `StateId::index`.
    transitions: Vec<Vec<Transition>>,
    current: Option<StateId>,
    elapsed: f32,
    rng: R,
    ticks: u64,
    candidates: Vec<StateId>,
}

impl Default for FsmScheduler<SplitMix64> {
    fn default() -> Self {
        Self::new()
    }
}

impl FsmScheduler<SplitMix64> {
    pub fn new() -> Self {
        Self::with_rng(SplitMix64::default())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SplitMix64::new(seed))
    }
}

impl<R> FsmScheduler<R>
where
    R: DeterministicRng + 'static,
{
    pub fn with_rng(rng: R) -> Self {
        Self {
            states: StateSet::new(),
            transitions: Vec::new(),
            current: None,
            elapsed: 0.0,
            rng,
            ticks: 0,
            candidates: Vec::new(),
        }
    }

    pub fn add_state(&mut self, label: impl Into<String>, state: impl State) -> StateId {
        let id = self.states.insert(label, state);
        self.transitions.push(Vec::new());
        id
    }

    /// Appends an edge `from -> to`. Edges leaving one state are evaluated in the order added.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<(), SchedulerError> {
        self.states.check(from)?;
        self.states.check(to)?;
        self.transitions[from.index()].push(Transition::new(to, conditions));
        Ok(())
    }

    pub fn transitions_from(&self, id: StateId) -> &[Transition] {
        self.transitions
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    pub fn elapsed_in_state(&self) -> f32 {
        self.elapsed
    }

    /// Updates run since the machine was first given a state.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state_label(&self, id: StateId) -> Option<&str> {
        self.states.label(id)
    }

    /// Exits the current state (if any), resets the timer and enters `to`, bypassing the graph.
    ///
    /// `to == current` runs a full exit/enter cycle.
    pub fn change_state(
        &mut self,
        to: StateId,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        self.switch(to, TraceKind::Forced, blackboard)
    }

    pub fn update(
        &mut self,
        dt_seconds: f32,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        self.ticks += 1;

        self.states.update(current, dt_seconds, blackboard)?;
        self.elapsed += dt_seconds;

        let duration = self.states.duration(current)?;
        if duration > 0.0 && self.elapsed < duration {
            tracing::trace!(
                state = self.states.label(current),
                elapsed = self.elapsed,
                duration,
                "timer gate closed"
            );
            return Ok(());
        }

        self.candidates.clear();
        for transition in &self.transitions[current.index()] {
            if transition.is_satisfied(blackboard) {
                self.candidates.push(transition.target());
            }
        }

        if self.candidates.is_empty() {
            return Ok(());
        }

        let pick = self.rng.next_index(self.candidates.len());
        let next = self.candidates[pick];
        self.switch(next, TraceKind::Transition, blackboard)
    }

    fn switch(
        &mut self,
        to: StateId,
        kind: TraceKind,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        self.states.check(to)?;

        let from = self.current;
        if let Some(prev) = from {
            self.states.exit(prev, blackboard)?;
        }

        self.current = Some(to);
        self.elapsed = 0.0;

        tracing::debug!(
            from = from.and_then(|id| self.states.label(id)),
            to = self.states.label(to),
            ?kind,
            tick = self.ticks,
            "state change"
        );
        trace_emit(
            blackboard,
            TraceEvent::new(self.ticks, kind)
                .with_from(from)
                .with_to(Some(to)),
        );

        self.states.enter(to, blackboard)
    }
}

impl<R> Scheduler for FsmScheduler<R>
where
    R: DeterministicRng + 'static,
{
    fn update(
        &mut self,
        dt_seconds: f32,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        FsmScheduler::update(self, dt_seconds, blackboard)
    }

    fn current_state(&self) -> Option<StateId> {
        self.current
    }

    fn state_label(&self, id: StateId) -> Option<&str> {
        self.states.label(id)
    }
}
