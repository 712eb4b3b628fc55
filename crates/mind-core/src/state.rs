use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Blackboard, Hook, SchedulerError};

pub type HookResult = anyhow::Result<()>;

/// Handle to a state registered with a scheduler.
///
/// Ids are only meaningful for the scheduler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateId(u32);

impl StateId {
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit of agent behavior.
///
/// While a state is active a scheduler calls `enter` once, `update` zero or more times, then
/// `exit` once before any other state is entered.
pub trait State: 'static {
    /// Seconds the state must stay active before its transitions are considered. `0` disables
    /// the timer.
    fn duration(&self) -> f32 {
        0.0
    }

    fn enter(&mut self, _blackboard: &mut Blackboard) -> HookResult {
        Ok(())
    }

    fn update(&mut self, _dt_seconds: f32, _blackboard: &mut Blackboard) -> HookResult {
        Ok(())
    }

    fn exit(&mut self, _blackboard: &mut Blackboard) -> HookResult {
        Ok(())
    }
}

struct Entry {
    label: String,
    state: Box<dyn State>,
}

/// Arena of registered states, indexed by [`StateId`].
#[derive(Default)]
pub struct StateSet {
    entries: Vec<Entry>,
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.label.as_str()))
            .finish()
    }
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, label: impl Into<String>, state: impl State) -> StateId {
        let id = StateId(self.entries.len() as u32);
        self.entries.push(Entry {
            label: label.into(),
            state: Box::new(state),
        });
        id
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.entries.len()
    }

    pub fn check(&self, id: StateId) -> Result<(), SchedulerError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SchedulerError::UnknownState(id))
        }
    }

    pub fn label(&self, id: StateId) -> Option<&str> {
        self.entries.get(id.index()).map(|e| e.label.as_str())
    }

    /// Declared duration, with negative and NaN values clamped to `0`.
    pub fn duration(&self, id: StateId) -> Result<f32, SchedulerError> {
        let entry = self.entry(id)?;
        let d = entry.state.duration();
        Ok(if d > 0.0 { d } else { 0.0 })
    }

    pub fn enter(&mut self, id: StateId, blackboard: &mut Blackboard) -> Result<(), SchedulerError> {
        let entry = self.entry_mut(id)?;
        let result = entry.state.enter(blackboard);
        wrap(entry, Hook::Enter, result)
    }

    pub fn update(
        &mut self,
        id: StateId,
        dt_seconds: f32,
        blackboard: &mut Blackboard,
    ) -> Result<(), SchedulerError> {
        let entry = self.entry_mut(id)?;
        let result = entry.state.update(dt_seconds, blackboard);
        wrap(entry, Hook::Update, result)
    }

    pub fn exit(&mut self, id: StateId, blackboard: &mut Blackboard) -> Result<(), SchedulerError> {
        let entry = self.entry_mut(id)?;
        let result = entry.state.exit(blackboard);
        wrap(entry, Hook::Exit, result)
    }

    fn entry(&self, id: StateId) -> Result<&Entry, SchedulerError> {
        self.entries
            .get(id.index())
            .ok_or(SchedulerError::UnknownState(id))
    }

    fn entry_mut(&mut self, id: StateId) -> Result<&mut Entry, SchedulerError> {
        self.entries
            .get_mut(id.index())
            .ok_or(SchedulerError::UnknownState(id))
    }
}

fn wrap(entry: &Entry, hook: Hook, result: HookResult) -> Result<(), SchedulerError> {
    result.map_err(|source| SchedulerError::Behavior {
        state: entry.label.clone(),
        hook,
        source,
    })
}
