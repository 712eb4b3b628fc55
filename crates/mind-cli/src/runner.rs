//! Builds a [`Brain`] from a [`Scenario`] and ticks it.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use mind_core::{Brain, BrainConfig, StateId};
use mind_fsm::FsmScheduler;
use mind_tools::{TraceEvent, TraceKind, TraceLog, TRACE_LOG};
use mind_utility::{UtilityConfig, UtilityScheduler};
use serde::Serialize;

use crate::behavior::ScriptedState;
use crate::scenario::{ConditionConfig, Scenario, Strategy};

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub ticks: u64,
    pub dt: f32,
    pub seed: u64,
}

impl RunOptions {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            ticks: scenario.ticks,
            dt: scenario.dt,
            seed: scenario.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRow {
    pub tick: u64,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionRow {
    pub tick: u64,
    pub kind: TraceKind,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub ticks: Vec<TickRow>,
    pub transitions: Vec<TransitionRow>,
}

impl RunReport {
    pub fn summary(&self) -> String {
        format!(
            "Ticks: {}, State changes: {}, Final: {}",
            self.ticks.len(),
            self.transitions.len(),
            self.ticks
                .last()
                .and_then(|row| row.state.as_deref())
                .unwrap_or("-")
        )
    }
}

fn lookup(ids: &BTreeMap<&str, StateId>, name: &str) -> Result<StateId> {
    ids.get(name)
        .copied()
        .with_context(|| format!("unknown state `{name}`"))
}

/// A fresh agent with the scenario's blackboard, a trace log, and one scheduler. FSM scenarios
/// are already in their initial state.
pub fn build_brain(scenario: &Scenario, seed: u64) -> Result<Brain> {
    let mut brain = Brain::new().with_config(BrainConfig {
        think_every_ticks: scenario.think_every_ticks.max(1),
        think_offset_ticks: 0,
    });

    for (key, value) in &scenario.blackboard {
        value.write(&mut brain.blackboard, key);
    }
    brain.blackboard.store(TRACE_LOG, TraceLog::default());

    match scenario.strategy {
        Strategy::Fsm => {
            let mut fsm = FsmScheduler::seeded(seed);
            let mut ids = BTreeMap::new();
            for state in &scenario.states {
                let id = fsm.add_state(&state.name, ScriptedState::from_config(state));
                ids.insert(state.name.as_str(), id);
            }

            for t in &scenario.transitions {
                let from = lookup(&ids, &t.from)?;
                let to = lookup(&ids, &t.to)?;
                let conditions = t
                    .when
                    .iter()
                    .map(ConditionConfig::build)
                    .collect::<Result<Vec<_>>>()?;
                fsm.add_transition(from, to, conditions)?;
            }

            let initial = scenario
                .initial
                .as_deref()
                .context("fsm scenarios need an `initial` state")?;
            fsm.change_state(lookup(&ids, initial)?, &mut brain.blackboard)?;
            brain.add_scheduler(Box::new(fsm));
        }
        Strategy::Utility => {
            let config = UtilityConfig {
                min_score: scenario.min_score.unwrap_or(f32::NEG_INFINITY),
                lifecycle: scenario.lifecycle,
            };
            let mut utility = UtilityScheduler::new().with_config(config);
            for state in &scenario.states {
                utility.add_state(
                    &state.name,
                    ScriptedState::from_config(state),
                    state.score.scorer(),
                );
            }
            brain.add_scheduler(Box::new(utility));
        }
    }

    Ok(brain)
}

/// Drains the trace log, stamping each event with the Brain tick it happened on.
fn drain_trace(brain: &mut Brain, tick: u64, into: &mut Vec<(u64, TraceEvent)>) {
    if let Ok(log) = brain.blackboard.fetch_mut(TRACE_LOG) {
        into.extend(log.events.drain(..).map(|e| (tick, e)));
    }
}

pub fn run(scenario: &Scenario, options: &RunOptions) -> Result<RunReport> {
    let mut brain = build_brain(scenario, options.seed)?;
    let mut report = RunReport::default();
    let mut events = Vec::new();

    // The initial forced state counts as tick 0.
    drain_trace(&mut brain, 0, &mut events);

    for tick in 0..options.ticks {
        for step in scenario.script.iter().filter(|s| s.tick == tick) {
            for (key, value) in &step.set {
                value.write(&mut brain.blackboard, key);
            }
            tracing::debug!(tick, keys = step.set.len(), "script step applied");
        }

        brain
            .tick(options.dt)
            .with_context(|| format!("tick {tick} failed"))?;
        drain_trace(&mut brain, tick, &mut events);

        let state = brain
            .scheduler(0)
            .and_then(|s| s.current_label())
            .map(str::to_owned);
        report.ticks.push(TickRow { tick, state });
    }

    let scheduler = brain.scheduler(0).context("brain has no scheduler")?;
    let label = |id: Option<StateId>| {
        id.and_then(|id| scheduler.state_label(id))
            .map(str::to_owned)
    };

    report.transitions = events
        .iter()
        .map(|(tick, e)| TransitionRow {
            tick: *tick,
            kind: e.kind,
            from: label(e.from),
            to: label(e.to),
        })
        .collect();

    Ok(report)
}
