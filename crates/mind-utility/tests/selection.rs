use mind_core::{Blackboard, HookResult, Scheduler, State};
use mind_tools::{TraceKind, TraceLog, TRACE_LOG};
use mind_utility::{LifecyclePolicy, UtilityConfig, UtilityScheduler};

fn record(bb: &mut Blackboard, entry: String) {
    match bb.get_mut::<Vec<String>>("log") {
        Ok(log) => log.push(entry),
        Err(_) => bb.set("log", vec![entry]),
    }
}

fn take_log(bb: &mut Blackboard) -> Vec<String> {
    bb.remove::<Vec<String>>("log").unwrap_or_default()
}

struct Probe(&'static str);

impl State for Probe {
    fn enter(&mut self, blackboard: &mut Blackboard) -> HookResult {
        record(blackboard, format!("{}.enter", self.0));
        Ok(())
    }

    fn update(&mut self, _dt_seconds: f32, blackboard: &mut Blackboard) -> HookResult {
        record(blackboard, format!("{}.update", self.0));
        Ok(())
    }

    fn exit(&mut self, blackboard: &mut Blackboard) -> HookResult {
        record(blackboard, format!("{}.exit", self.0));
        Ok(())
    }
}

/// Scores read from `<name>.score`, defaulting to zero.
fn score_of(name: &'static str) -> impl FnMut(&Blackboard) -> f32 {
    let key = format!("{name}.score");
    move |bb: &Blackboard| bb.get_or(&key, 0.0f32)
}

fn scheduler(config: UtilityConfig) -> UtilityScheduler {
    let mut utility = UtilityScheduler::new().with_config(config);
    for name in ["a", "b", "c"] {
        utility.add_state(name, Probe(name), score_of(name));
    }
    utility
}

#[test]
fn update_with_no_states_is_a_noop() {
    let mut utility = UtilityScheduler::new();
    let mut bb = Blackboard::new();

    utility.update(1.0, &mut bb).unwrap();

    assert!(utility.is_empty());
    assert_eq!(utility.current_state(), None);
    assert!(bb.is_empty());
}

#[test]
fn selects_first_maximum_on_ties() {
    let mut utility = UtilityScheduler::new();
    utility.add_state("a", Probe("a"), |_: &Blackboard| 3.0);
    let b = utility.add_state("b", Probe("b"), |_: &Blackboard| 5.0);
    utility.add_state("c", Probe("c"), |_: &Blackboard| 5.0);

    let mut bb = Blackboard::new();
    utility.update(1.0, &mut bb).unwrap();

    assert_eq!(utility.current_state(), Some(b));
    assert_eq!(utility.last_best_score(), 5.0);
    assert_eq!(take_log(&mut bb), ["b.enter", "b.update"]);
}

#[test]
fn paired_lifecycle_exits_previous_winner() {
    let mut utility = scheduler(UtilityConfig::default());
    let mut bb = Blackboard::new();

    bb.set("a.score", 1.0f32);
    utility.update(0.1, &mut bb).unwrap();
    utility.update(0.1, &mut bb).unwrap();
    assert_eq!(take_log(&mut bb), ["a.enter", "a.update", "a.update"]);

    bb.set("c.score", 2.0f32);
    utility.update(0.1, &mut bb).unwrap();
    assert_eq!(take_log(&mut bb), ["a.exit", "c.enter", "c.update"]);
    assert_eq!(utility.current_label(), Some("c"));
}

#[test]
fn update_only_lifecycle_never_enters_or_exits() {
    let mut utility = scheduler(UtilityConfig {
        lifecycle: LifecyclePolicy::UpdateOnly,
        ..UtilityConfig::default()
    });
    let mut bb = Blackboard::new();

    bb.set("b.score", 1.0f32);
    utility.update(0.1, &mut bb).unwrap();
    bb.set("a.score", 4.0f32);
    utility.update(0.1, &mut bb).unwrap();

    assert_eq!(take_log(&mut bb), ["b.update", "a.update"]);
    assert_eq!(utility.current_label(), Some("a"));
}

#[test]
fn min_score_deselects_and_exits() {
    let mut utility = scheduler(UtilityConfig {
        min_score: 0.5,
        ..UtilityConfig::default()
    });
    let mut bb = Blackboard::new();
    bb.store(TRACE_LOG, TraceLog::default());

    utility.update(0.1, &mut bb).unwrap();
    assert_eq!(utility.current_state(), None);
    assert_eq!(utility.last_best_score(), 0.0);

    bb.set("b.score", 0.75f32);
    utility.update(0.1, &mut bb).unwrap();
    bb.set("b.score", 0.25f32);
    utility.update(0.1, &mut bb).unwrap();

    assert_eq!(utility.current_state(), None);
    assert_eq!(take_log(&mut bb), ["b.enter", "b.update", "b.exit"]);

    let log = bb.fetch(TRACE_LOG).unwrap();
    let kinds: Vec<_> = log.events.iter().map(|e| (e.tick, e.kind)).collect();
    assert_eq!(
        kinds,
        vec![(2, TraceKind::Selected), (3, TraceKind::Deselected)]
    );
}

#[test]
fn nan_scores_lose_to_finite_scores() {
    let mut utility = UtilityScheduler::new();
    utility.add_state("broken", Probe("broken"), |_: &Blackboard| f32::NAN);
    let fallback = utility.add_state("fallback", Probe("fallback"), |_: &Blackboard| -10.0);

    let mut bb = Blackboard::new();
    utility.update(0.1, &mut bb).unwrap();

    assert_eq!(utility.current_state(), Some(fallback));
}

#[test]
fn first_state_wins_when_no_score_is_finite() {
    let mut utility = UtilityScheduler::new();
    let a = utility.add_state("a", Probe("a"), |_: &Blackboard| f32::NEG_INFINITY);
    utility.add_state("b", Probe("b"), |_: &Blackboard| f32::NAN);

    let mut bb = Blackboard::new();
    utility.update(1.0, &mut bb).unwrap();

    assert_eq!(utility.current_state(), Some(a));
    assert_eq!(utility.last_best_score(), f32::NEG_INFINITY);
    assert_eq!(take_log(&mut bb), ["a.enter", "a.update"]);
}

#[test]
fn stateful_scorers_are_allowed() {
    let mut utility = UtilityScheduler::new();
    let mut calls = 0u32;
    let rising = utility.add_state("rising", Probe("rising"), move |_: &Blackboard| {
        calls += 1;
        calls as f32
    });
    let flat = utility.add_state("flat", Probe("flat"), |_: &Blackboard| 2.5);

    let mut bb = Blackboard::new();
    let mut picks = Vec::new();
    for _ in 0..4 {
        utility.update(0.1, &mut bb).unwrap();
        picks.push(utility.current_state().unwrap());
    }

    assert_eq!(picks, vec![flat, flat, rising, rising]);
}
