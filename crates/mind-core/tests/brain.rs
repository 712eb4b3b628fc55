use mind_core::{
    Blackboard, Brain, BrainConfig, HookResult, Scheduler, SchedulerError, State, StateId,
    StateSet,
};

/// Runs a single state forever and records every delta it sees.
struct Recorder {
    states: StateSet,
    id: StateId,
    entered: bool,
}

struct Sink;

impl State for Sink {
    fn update(&mut self, dt_seconds: f32, blackboard: &mut Blackboard) -> HookResult {
        match blackboard.get_mut::<Vec<f32>>("dts") {
            Ok(dts) => dts.push(dt_seconds),
            Err(_) => blackboard.set("dts", vec![dt_seconds]),
        }
        Ok(())
    }
}

impl Recorder {
    fn new() -> Self {
        let mut states = StateSet::new();
        let id = states.insert("sink", Sink);
        Self {
            states,
            id,
            entered: false,
        }
    }
}

impl Scheduler for Recorder {
    fn update(&mut self, dt_seconds: f32, blackboard: &mut Blackboard) -> Result<(), SchedulerError> {
        if !self.entered {
            self.states.enter(self.id, blackboard)?;
            self.entered = true;
        }
        self.states.update(self.id, dt_seconds, blackboard)
    }

    fn current_state(&self) -> Option<StateId> {
        self.entered.then_some(self.id)
    }

    fn state_label(&self, id: StateId) -> Option<&str> {
        self.states.label(id)
    }
}

#[test]
fn staggered_config_spreads_agents() {
    let a = BrainConfig::staggered(0, 4);
    let b = BrainConfig::staggered(1, 4);

    assert!(a.should_think(0));
    assert!(!b.should_think(0));
    assert!(b.should_think(3));
    assert!(a.should_think(4));
}

#[test]
fn brain_accumulates_delta_across_skipped_ticks() {
    let mut brain = Brain::new()
        .with_config(BrainConfig {
            think_every_ticks: 3,
            think_offset_ticks: 0,
        })
        .with_scheduler(Recorder::new());

    for _ in 0..6 {
        brain.tick(0.5).unwrap();
    }

    // Thinks on tick 0 (0.5s) and tick 3 (1.5s carried from ticks 1..=3).
    let dts = brain.blackboard.get::<Vec<f32>>("dts").unwrap();
    assert_eq!(dts, &vec![0.5, 1.5]);
    assert_eq!(brain.tick_count(), 6);
    assert_eq!(brain.scheduler(0).and_then(|s| s.current_label()), Some("sink"));
}

#[test]
fn schedulers_share_one_blackboard() {
    let mut brain = Brain::new();
    brain.add_scheduler(Box::new(Recorder::new()));
    brain.add_scheduler(Box::new(Recorder::new()));

    brain.tick(0.25).unwrap();

    let dts = brain.blackboard.get::<Vec<f32>>("dts").unwrap();
    assert_eq!(dts, &vec![0.25, 0.25]);
    assert_eq!(brain.schedulers().count(), 2);
}
