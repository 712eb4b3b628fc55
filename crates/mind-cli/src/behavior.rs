use mind_core::{Blackboard, HookResult, State};

use crate::scenario::{StateConfig, Value};

/// State built from a scenario entry: logs its lifecycle and applies configured blackboard writes.
pub struct ScriptedState {
    name: String,
    duration: f32,
    on_enter: Vec<(String, Value)>,
    on_exit: Vec<(String, Value)>,
}

impl ScriptedState {
    pub fn from_config(config: &StateConfig) -> Self {
        Self {
            name: config.name.clone(),
            duration: config.duration,
            on_enter: config.on_enter.clone().into_iter().collect(),
            on_exit: config.on_exit.clone().into_iter().collect(),
        }
    }
}

fn apply(writes: &[(String, Value)], blackboard: &mut Blackboard) {
    for (key, value) in writes {
        value.write(blackboard, key);
    }
}

impl State for ScriptedState {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn enter(&mut self, blackboard: &mut Blackboard) -> HookResult {
        tracing::info!(state = %self.name, "enter");
        apply(&self.on_enter, blackboard);
        Ok(())
    }

    fn update(&mut self, dt_seconds: f32, _blackboard: &mut Blackboard) -> HookResult {
        tracing::trace!(state = %self.name, dt_seconds, "update");
        Ok(())
    }

    fn exit(&mut self, blackboard: &mut Blackboard) -> HookResult {
        tracing::info!(state = %self.name, "exit");
        apply(&self.on_exit, blackboard);
        Ok(())
    }
}
