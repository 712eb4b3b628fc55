//! Scenario files: YAML descriptions of one agent's states, guards and scripted blackboard writes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use mind_core::{Blackboard, Condition};
use mind_utility::LifecyclePolicy;
use serde::{Deserialize, Serialize};

/// A scalar blackboard value as written in YAML.
///
/// Stored on the blackboard as `bool`, `i64`, `f64` or `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn write(&self, blackboard: &mut Blackboard, key: &str) {
        match self {
            Value::Bool(v) => blackboard.set(key, *v),
            Value::Int(v) => blackboard.set(key, *v),
            Value::Float(v) => blackboard.set(key, *v),
            Value::Text(v) => blackboard.set(key, v.clone()),
        }
    }
}

/// Reads `key` as a number, accepting both integer and float entries.
pub fn numeric(blackboard: &Blackboard, key: &str) -> Option<f64> {
    if let Ok(v) = blackboard.get::<f64>(key) {
        return Some(*v);
    }
    blackboard.get::<i64>(key).ok().map(|v| *v as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Fsm,
    Utility,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub strategy: Strategy,

    /// Seed for the FSM tie-break generator
    pub seed: u64,

    /// Default tick delta in seconds
    #[serde(default = "default_dt")]
    pub dt: f32,

    /// Default number of ticks to run
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    #[serde(default = "default_think_every_ticks")]
    pub think_every_ticks: u32,

    /// Utility only
    pub min_score: Option<f32>,

    /// Utility only
    pub lifecycle: LifecyclePolicy,

    /// Initial blackboard contents
    pub blackboard: BTreeMap<String, Value>,

    pub states: Vec<StateConfig>,

    /// FSM only: state forced before the first tick
    pub initial: Option<String>,

    pub transitions: Vec<TransitionConfig>,

    pub script: Vec<ScriptStep>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed: 0,
            dt: default_dt(),
            ticks: default_ticks(),
            think_every_ticks: default_think_every_ticks(),
            min_score: None,
            lifecycle: LifecyclePolicy::default(),
            blackboard: BTreeMap::new(),
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            script: Vec::new(),
        }
    }
}

fn default_dt() -> f32 {
    1.0
}
fn default_ticks() -> u64 {
    10
}
fn default_think_every_ticks() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    pub name: String,

    /// Seconds before transitions are considered; 0 disables the timer
    #[serde(default)]
    pub duration: f32,

    /// Blackboard writes applied on enter
    #[serde(default)]
    pub on_enter: BTreeMap<String, Value>,

    /// Blackboard writes applied on exit
    #[serde(default)]
    pub on_exit: BTreeMap<String, Value>,

    /// Utility only; defaults to a constant 0
    #[serde(default)]
    pub score: ScoreConfig,
}

/// `constant + weight * <key>`; a missing or non-numeric key contributes 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    #[serde(default)]
    pub constant: f32,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            constant: 0.0,
            key: None,
            weight: default_weight(),
        }
    }
}

fn default_weight() -> f32 {
    1.0
}

impl ScoreConfig {
    pub fn scorer(&self) -> impl FnMut(&Blackboard) -> f32 + 'static {
        let constant = self.constant;
        let weight = self.weight;
        let key = self.key.clone();
        move |bb: &Blackboard| {
            let input = key
                .as_deref()
                .and_then(|k| numeric(bb, k))
                .unwrap_or(0.0);
            constant + weight * input as f32
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    pub from: String,
    pub to: String,

    /// Disjunction; empty means unconditional
    #[serde(default)]
    pub when: Vec<ConditionConfig>,
}

/// One blackboard test. Exactly one of `equals`, `above`, `below` or `set` must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConditionConfig {
    pub key: String,
    pub equals: Option<Value>,
    pub above: Option<f64>,
    pub below: Option<f64>,
    /// Holds when the key is present, whatever its type
    pub set: Option<bool>,
    pub inverted: bool,
}

impl ConditionConfig {
    pub fn build(&self) -> Result<Condition> {
        let tests = [
            self.equals.is_some(),
            self.above.is_some(),
            self.below.is_some(),
            self.set.is_some(),
        ];
        match tests.iter().filter(|t| **t).count() {
            1 => {}
            0 => bail!("condition on `{}` has no test", self.key),
            _ => bail!("condition on `{}` has more than one test", self.key),
        }

        let key = self.key.clone();
        let condition = if let Some(value) = &self.equals {
            match value.clone() {
                Value::Bool(v) => Condition::equals(key, v),
                Value::Int(v) => Condition::equals(key, v),
                Value::Float(v) => Condition::equals(key, v),
                Value::Text(v) => Condition::equals(key, v),
            }
        } else if let Some(threshold) = self.above {
            Condition::new(move |bb: &Blackboard| numeric(bb, &key).is_some_and(|v| v > threshold))
        } else if let Some(threshold) = self.below {
            Condition::new(move |bb: &Blackboard| numeric(bb, &key).is_some_and(|v| v < threshold))
        } else {
            let want = self.set.unwrap_or(true);
            Condition::new(move |bb: &Blackboard| bb.contains(&key) == want)
        };

        Ok(if self.inverted {
            condition.inverted()
        } else {
            condition
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Applied before the brain ticks on this tick index
    pub tick: u64,
    pub set: BTreeMap<String, Value>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid scenario: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Scenario =
            serde_yaml::from_str(content).context("Failed to parse scenario YAML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.states.is_empty() {
            bail!("scenario declares no states");
        }
        if !(self.dt >= 0.0) {
            bail!("dt must be a non-negative number, got {}", self.dt);
        }

        let mut names = BTreeSet::new();
        for state in &self.states {
            if !names.insert(state.name.as_str()) {
                bail!("duplicate state `{}`", state.name);
            }
            if state.duration < 0.0 {
                bail!("state `{}` has a negative duration", state.name);
            }
        }

        let known = |name: &str, role: &str| -> Result<()> {
            if names.contains(name) {
                Ok(())
            } else {
                bail!("{role} refers to unknown state `{name}`")
            }
        };

        for t in &self.transitions {
            known(&t.from, "transition source")?;
            known(&t.to, "transition target")?;
            for c in &t.when {
                c.build()
                    .with_context(|| format!("transition `{}` -> `{}`", t.from, t.to))?;
            }
        }

        match self.strategy {
            Strategy::Fsm => match &self.initial {
                Some(initial) => known(initial, "initial")?,
                None => bail!("fsm scenarios need an `initial` state"),
            },
            Strategy::Utility => {
                if !self.transitions.is_empty() {
                    tracing::warn!(
                        count = self.transitions.len(),
                        "utility scenarios ignore transitions"
                    );
                }
            }
        }

        Ok(())
    }
}
