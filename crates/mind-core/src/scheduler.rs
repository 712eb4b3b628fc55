use crate::{Blackboard, SchedulerError, StateId};

/// A decision strategy that picks, tick by tick, which state an agent runs.
pub trait Scheduler: 'static {
    fn update(&mut self, dt_seconds: f32, blackboard: &mut Blackboard)
        -> Result<(), SchedulerError>;

    fn current_state(&self) -> Option<StateId>;

    fn state_label(&self, id: StateId) -> Option<&str>;

    fn current_label(&self) -> Option<&str> {
        self.current_state().and_then(|id| self.state_label(id))
    }
}
