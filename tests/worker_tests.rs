mod common;

use common::{shared_scorer, three_key_geometry};
use keygrid::core_types::Alphabet;
use keygrid::corpus::Corpus;
use keygrid::keycodes::ReservedMap;
use keygrid::optimizer::{Worker, WorkerEvent, WorkerOptions};
use keygrid::scorer::Scorer;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::Arc;

fn options(patience: Vec<usize>, limit: Option<u64>) -> WorkerOptions {
    WorkerOptions {
        patience,
        attempt_limit: limit,
        ..WorkerOptions::default()
    }
}

#[test]
fn test_first_attempt_always_improves() {
    let mut worker = Worker::new(0, shared_scorer(), WorkerOptions::default(), Some(1)).unwrap();
    assert!(worker.best_cost.is_infinite());

    let imp = worker.attempt().unwrap().expect("anything beats infinity");
    assert_eq!(imp.generation, 1);
    assert_eq!(imp.attempts, 1);
    assert_eq!(imp.stagnation, 1);
    assert_eq!(imp.mutations, 3);
    assert_eq!(worker.best_cost, imp.cost);
    assert_eq!(worker.best, imp.layout);
    assert_eq!(worker.stagnation, 0);
}

#[test]
fn test_costs_strictly_decrease_within_a_generation() {
    let mut worker =
        Worker::new(2, shared_scorer(), options(vec![20, 20, 20], None), Some(9)).unwrap();

    let mut last: HashMap<u64, f64> = HashMap::new();
    for _ in 0..1500 {
        if let Some(imp) = worker.attempt().unwrap() {
            assert!(imp.layout.is_consistent());
            assert_eq!(imp.cost, imp.details.cost);
            if let Some(prev) = last.get(&imp.generation) {
                assert!(imp.cost < *prev, "gen {} went {} -> {}", imp.generation, prev, imp.cost);
            }
            last.insert(imp.generation, imp.cost);
        }
    }
    assert_eq!(worker.attempts, 1500);
}

#[test]
fn test_restart_resets_lineage() {
    let mut worker = Worker::new(0, shared_scorer(), WorkerOptions::default(), Some(4)).unwrap();
    worker.attempt().unwrap();
    worker.mutations = 1;
    worker.stagnation = 17;

    worker.restart().unwrap();
    assert_eq!(worker.generation, 2);
    assert_eq!(worker.mutations, 3);
    assert_eq!(worker.stagnation, 0);
    assert!(worker.best_cost.is_infinite());
    assert!(worker.best.is_consistent());
    assert_eq!(worker.attempts, 1, "attempt count survives restarts");
}

#[test]
fn test_exhausted_patience_lowers_intensity() {
    let mut worker = Worker::new(0, shared_scorer(), WorkerOptions::default(), Some(4)).unwrap();
    worker.stagnation = 1_000;

    worker.attempt().unwrap();
    assert_eq!(worker.mutations, 2);
    assert_eq!(worker.generation, 1);
}

#[test]
fn test_reaching_the_floor_restarts() {
    let mut worker = Worker::new(0, shared_scorer(), WorkerOptions::default(), Some(4)).unwrap();
    worker.attempt().unwrap();
    worker.mutations = 1;
    worker.stagnation = 1_000;

    let imp = worker.attempt().unwrap().expect("fresh lineage improves at once");
    assert_eq!(imp.generation, 2);
    assert_eq!(imp.mutations, 3);
}

#[test]
fn test_short_patience_triggers_restarts() {
    let mut worker =
        Worker::new(1, shared_scorer(), options(vec![2, 2, 2], None), Some(21)).unwrap();
    for _ in 0..3000 {
        worker.attempt().unwrap();
    }
    assert!(worker.generation > 1);
}

#[test]
fn test_invalid_schedule_is_rejected() {
    let bad = WorkerOptions {
        mutation_start: 2,
        mutation_floor: 2,
        ..WorkerOptions::default()
    };
    assert!(Worker::new(0, shared_scorer(), bad, Some(1)).is_err());
    assert!(Worker::new(0, shared_scorer(), options(vec![], None), Some(1)).is_err());
}

#[test]
fn test_patience_lookup_reuses_last_entry() {
    let opts = options(vec![10, 20], None);
    assert_eq!(opts.patience_for(1), 10);
    assert_eq!(opts.patience_for(2), 20);
    assert_eq!(opts.patience_for(5), 20);
}

#[test]
fn test_run_honours_attempt_limit() {
    let mut worker =
        Worker::new(0, shared_scorer(), options(vec![50, 50, 50], Some(250)), Some(2)).unwrap();
    let (tx, rx) = mpsc::sync_channel(4096);
    let shutdown = AtomicBool::new(false);

    worker.run(&tx, &shutdown);
    drop(tx);

    assert_eq!(worker.attempts, 250);
    let events: Vec<WorkerEvent> = rx.iter().collect();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| matches!(e, WorkerEvent::Improved(_))));
}

#[test]
fn test_run_stops_when_receiver_is_gone() {
    let mut worker = Worker::new(0, shared_scorer(), WorkerOptions::default(), Some(2)).unwrap();
    let (tx, rx) = mpsc::sync_channel(1);
    drop(rx);
    let shutdown = AtomicBool::new(false);

    worker.run(&tx, &shutdown);
    assert_eq!(worker.attempts, 1);
}

#[test]
fn test_run_reports_scoring_failures() {
    // Corpus carries a byte the layout never places.
    let geometry = three_key_geometry();
    let reserved = ReservedMap::empty(&geometry);
    let wider = Alphabet::new(b"abcd").unwrap();
    let scorer = Arc::new(Scorer {
        geometry,
        reserved,
        alphabet: Alphabet::new(b"abc").unwrap(),
        corpus: Corpus::new(b"abd".to_vec(), &wider).unwrap(),
    });

    let mut worker = Worker::new(3, scorer, WorkerOptions::default(), Some(2)).unwrap();
    let (tx, rx) = mpsc::sync_channel(4);
    let shutdown = AtomicBool::new(false);
    worker.run(&tx, &shutdown);
    drop(tx);

    let events: Vec<WorkerEvent> = rx.iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], WorkerEvent::Failed { worker: 3, .. }));
}
