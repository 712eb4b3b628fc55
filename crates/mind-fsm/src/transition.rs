use mind_core::{Blackboard, Condition, StateId};

/// Guarded edge to `target`.
///
/// Satisfied when there are no conditions or when any one of them holds.
#[derive(Debug, Clone)]
pub struct Transition {
    target: StateId,
    conditions: Vec<Condition>,
}

impl Transition {
    pub fn new(target: StateId, conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            target,
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn is_satisfied(&self, blackboard: &Blackboard) -> bool {
        self.is_unconditional() || self.conditions.iter().any(|c| c.evaluate(blackboard))
    }
}
