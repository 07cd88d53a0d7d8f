//! Integration Test: End-to-end scenarios on the two-process, two-resource system

use bankers_twin::{
    check_all_invariants, cross_check, ArbiterEvent, Decision, DenialReason, ProcessId,
    RecordingObserver, RequestArbiter, ResourceId, ResourceState, SafetyChecker,
    ScenarioConfig, ScenarioRunner, ScriptedSource, SequenceValidator,
};

fn scenario_one() -> ResourceState {
    ResourceState::new(
        vec![3, 3],
        vec![vec![3, 2], vec![2, 2]],
        vec![vec![1, 0], vec![0, 1]],
    )
    .unwrap()
}

fn scenario_two() -> ResourceState {
    ResourceState::new(
        vec![0, 0],
        vec![vec![2, 2], vec![2, 2]],
        vec![vec![1, 1], vec![1, 1]],
    )
    .unwrap()
}

#[test]
fn test_plentiful_state_is_safe_with_order() {
    let state = scenario_one();
    assert_eq!(state.need_matrix(), &[vec![2, 2], vec![2, 1]]);
    assert!(SafetyChecker::new().is_safe(&state));

    let validator = SequenceValidator::new();
    let seq = validator.find_safe_sequence(&state).unwrap();
    assert!(validator.is_valid_sequence(&state, seq.as_slice()));
    // Both orders work here
    assert!(validator.is_valid_sequence(&state, &[ProcessId(1), ProcessId(0)]));
}

#[test]
fn test_starved_state_is_unsafe() {
    let state = scenario_two();
    assert_eq!(state.need_matrix(), &[vec![1, 1], vec![1, 1]]);
    assert!(!SafetyChecker::new().is_safe(&state));
    assert!(SequenceValidator::new().find_safe_sequence(&state).is_none());

    let check = cross_check(&state).unwrap();
    assert!(!check.safe);
}

#[test]
fn test_grant_updates_all_three_arrays() {
    let mut state = scenario_one();
    let mut arbiter = RequestArbiter::new();

    let granted = arbiter
        .request_granted(&mut state, ProcessId(0), &[1, 1])
        .unwrap();

    assert!(granted);
    assert_eq!(state.available(), &[2, 2]);
    assert_eq!(state.allocation(ProcessId(0)), &[2, 1]);
    assert_eq!(state.need(ProcessId(0)), &[1, 1]);
    assert!(check_all_invariants(&state).is_empty());
}

#[test]
fn test_infeasible_request_denied_without_mutation() {
    // [4, 0] exceeds Available and both processes' Need
    let mut state = scenario_one();
    let before = state.clone();
    let mut arbiter = RequestArbiter::new().with_observer(RecordingObserver::new());

    for p in [ProcessId(0), ProcessId(1)] {
        let decision = arbiter.request(&mut state, p, &[4, 0]).unwrap();
        assert_eq!(
            decision,
            Decision::Denied(DenialReason::Infeasible {
                resource: ResourceId(0),
                requested: 4,
                available: 3,
            })
        );
        assert_eq!(state, before);
    }
    assert!(!arbiter
        .observer()
        .events()
        .iter()
        .any(|e| matches!(e, ArbiterEvent::Applied { .. })));
}

#[test]
fn test_denied_then_granted_sequence() {
    // p1 asking first would strand p0; p0 finishing its claim first is fine
    let mut state = ResourceState::new(vec![3], vec![vec![4], vec![4]], vec![vec![1], vec![0]])
        .unwrap();
    let mut arbiter = RequestArbiter::new();

    let first = arbiter.request(&mut state, ProcessId(1), &[1]).unwrap();
    assert_eq!(first, Decision::Denied(DenialReason::Unsafe));
    assert_eq!(state.available(), &[3]);

    let second = arbiter.request(&mut state, ProcessId(0), &[3]).unwrap();
    assert_eq!(second, Decision::Granted);
    assert_eq!(state.need(ProcessId(0)), &[0]);
    assert_eq!(state.available(), &[0]);
    assert!(SafetyChecker::new().is_safe(&state));
}

#[test]
fn test_scripted_dynamic_scenario() {
    let runner = ScenarioRunner::new(ScenarioConfig::default()).unwrap();
    // Scenario one, then p0 asks [1, 1] (granted), then p1 asks [2, 1]
    let mut source = ScriptedSource::new([
        3, 3, // available
        3, 1, 2, 0, // p0: max/alloc per resource
        2, 0, 2, 1, // p1
        0, 1, 1, // step 1
        1, 2, 1, // step 2
    ]);

    let report = runner.run(&mut source).unwrap();

    assert!(report.initial_safe);
    assert_eq!(report.steps.len(), 2);
    assert!(report.steps[0].decision.is_granted());
    // After step 1: available [2, 2]; p1 needs [2, 1] and can finish
    assert!(report.steps[1].decision.is_granted());
    assert_eq!(report.final_state.available(), &[0, 1]);
    assert!(report.steps.iter().all(|s| s.safe_after));

    let text = report.to_string();
    assert!(text.contains("Initial state: safe (p0 -> p1)"));
}
