use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mind_core::{Blackboard, Condition, State};
use mind_fsm::FsmScheduler;

struct Noop;

impl State for Noop {}

fn bench_fsm_update(c: &mut Criterion) {
    let mut fsm = FsmScheduler::seeded(7);
    let ids: Vec<_> = (0..8).map(|i| fsm.add_state(format!("s{i}"), Noop)).collect();

    // Every state has 32 guarded edges; only the last condition of each guard holds.
    for &from in &ids {
        for &to in &ids {
            let guard = (0..3)
                .map(|_| Condition::flag("never_set"))
                .chain([Condition::flag("go")]);
            for _ in 0..4 {
                fsm.add_transition(from, to, guard.clone()).unwrap();
            }
        }
    }

    let mut bb = Blackboard::new();
    bb.set("go", true);
    fsm.change_state(ids[0], &mut bb).unwrap();

    c.bench_function("mind-fsm/update(states=8,edges=32)", |b| {
        b.iter(|| {
            fsm.update(black_box(0.016), &mut bb).unwrap();
            black_box(fsm.current_state());
        })
    });
}

criterion_group!(benches, bench_fsm_update);
criterion_main!(benches);
