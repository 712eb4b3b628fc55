#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mind_core::{Blackboard, Scheduler, SchedulerError, State, StateId, StateSet};
use mind_tools::{emit as trace_emit, TraceEvent, TraceKind};

/// Which lifecycle hooks the utility scheduler drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifecyclePolicy {
    /// `exit` the previous winner and `enter` the new one whenever the winner changes.
    #[default]
    Paired,
    /// Only `update` the winner; `enter`/`exit` are never called.
    UpdateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityConfig {
    /// Minimum score required to select a state.
    ///
    /// If every score is below this threshold, no state runs this tick.
    pub min_score: f32,
    pub lifecycle: LifecyclePolicy,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            min_score: f32::NEG_INFINITY,
            lifecycle: LifecyclePolicy::Paired,
        }
    }
}

struct UtilityOption {
    state: StateId,
    score_fn: Box<dyn FnMut(&Blackboard) -> f32>,
}

impl UtilityOption {
    fn score(&mut self, blackboard: &Blackboard) -> f32 {
        let s = (self.score_fn)(blackboard);
        if s.is_nan() {
            f32::NEG_INFINITY
        } else {
            s
        }
    }
}

/// Re-selects the highest-scoring state on every update.
///
/// NaN scores rank as `-inf`. Some state always wins unless `min_score` filters it out.
pub struct UtilityScheduler {
    states: StateSet,
    options: Vec<UtilityOption>,
    config: UtilityConfig,
    active: Option<StateId>,
    last_best_score: f32,
    ticks: u64,
}

impl Default for UtilityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl UtilityScheduler {
    pub fn new() -> Self {
        Self {
            states: StateSet::new(),
            options: Vec::new(),
            config: UtilityConfig::default(),
            active: None,
            last_best_score: f32::NEG_INFINITY,
            ticks: 0,
        }
    }

    pub fn with_config(mut self, config: UtilityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &UtilityConfig {
        &self.config
    }

    pub fn add_state(
        &mut self,
        label: impl Into<String>,
        state: impl State,
        score_fn: impl FnMut(&Blackboard) -> f32 + 'static,
    ) -> StateId {
        let id = self.states.insert(label, state);
        self.options.push(UtilityOption {
            state: id,
            score_fn: Box::new(score_fn),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Winner of the most recent update.
    pub fn current_state(&self) -> Option<StateId> {
        self.active
    }

    pub fn last_best_score(&self) -> f32 {
        self.last_best_score
    }

    pub fn state_label(&self, id: StateId) -> Option<&str> {
        self.states.label(id)
    }

    pub fn update(
        &mut self,
        dt_seconds: f32,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        if self.options.is_empty() {
            return Ok(());
        }
        self.ticks += 1;

        let bb_view: &Blackboard = &*blackboard;
        let mut scores = self.options.iter_mut().map(|opt| opt.score(bb_view));
        let mut best_idx = 0;
        let mut best_score = scores.next().unwrap_or(f32::NEG_INFINITY);

        for (i, score) in scores.enumerate() {
            if score > best_score {
                best_score = score;
                best_idx = i + 1;
            }
        }

        self.last_best_score = best_score;

        let choice =
            (best_score >= self.config.min_score).then(|| self.options[best_idx].state);

        if choice != self.active {
            self.switch(choice, blackboard)?;
        }

        match choice {
            Some(id) => self.states.update(id, dt_seconds, blackboard),
            None => Ok(()),
        }
    }

    fn switch(
        &mut self,
        to: Option<StateId>,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        let paired = self.config.lifecycle == LifecyclePolicy::Paired;
        let from = self.active;

        if paired {
            if let Some(prev) = from {
                self.states.exit(prev, blackboard)?;
            }
        }

        self.active = to;

        let kind = if to.is_some() {
            TraceKind::Selected
        } else {
            TraceKind::Deselected
        };
        tracing::debug!(
            from = from.and_then(|id| self.states.label(id)),
            to = to.and_then(|id| self.states.label(id)),
            score = self.last_best_score,
            tick = self.ticks,
            "utility winner changed"
        );
        trace_emit(
            blackboard,
            TraceEvent::new(self.ticks, kind).with_from(from).with_to(to),
        );

        match to {
            Some(next) if paired => self.states.enter(next, blackboard),
            _ => Ok(()),
        }
    }
}

impl Scheduler for UtilityScheduler {
    fn update(
        &mut self,
        dt_seconds: f32,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        UtilityScheduler::update(self, dt_seconds, blackboard)
    }

    fn current_state(&self) -> Option<StateId> {
        self.active
    }

    fn state_label(&self, id: StateId) -> Option<&str> {
        self.states.label(id)
    }
}
