//! Integration Test: JSON documents and report encoding

use bankers_twin::infrastructure::{
    encode_json, encode_report, load_scenario_config, load_state, save_state,
};
use bankers_twin::{
    BankerError, ErrorKind, InfraError, ProcessId, RequestArbiter, ScenarioConfig,
    ScenarioRunner, ScriptedSource,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_state_round_trips_through_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(
        &path,
        r#"{ "available": [3, 3], "max": [[3, 2], [2, 2]], "allocation": [[1, 0], [0, 1]] }"#,
    )
    .unwrap();

    let mut state = load_state(&path).unwrap();
    assert_eq!(state.need(ProcessId(1)), &[2, 1]);

    RequestArbiter::new()
        .request(&mut state, ProcessId(0), &[1, 1])
        .unwrap();
    let out = dir.path().join("after.json");
    save_state(&out, &state).unwrap();

    let reloaded = load_state(&out).unwrap();
    assert_eq!(reloaded, state);
}

#[test]
fn test_invalid_state_is_domain_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "available": [1], "max": [[1]], "allocation": [[2]] }"#).unwrap();

    match load_state(&path) {
        Err(InfraError::Domain(err)) => {
            assert!(matches!(err, BankerError::AllocationExceedsMax { .. }));
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[test]
fn test_malformed_json_and_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_state(&path), Err(InfraError::Json(_))));
    assert!(matches!(
        load_state(dir.path().join("missing.json")),
        Err(InfraError::Io { .. })
    ));
}

#[test]
fn test_load_scenario_config_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "processes": 3, "scenario_limit": 50 }"#).unwrap();

    let config = load_scenario_config(&path).unwrap();
    assert_eq!(
        config,
        ScenarioConfig::new().processes(3).scenario_limit(Some(50))
    );

    fs::write(&path, r#"{ "resources": 0 }"#).unwrap();
    assert!(matches!(
        load_scenario_config(&path),
        Err(InfraError::Domain(BankerError::ZeroDimension { .. }))
    ));
}

#[test]
fn test_encoded_report_is_single_json_line() {
    let runner = ScenarioRunner::new(ScenarioConfig::default().requests(1)).unwrap();
    let mut source = ScriptedSource::new([3, 3, 3, 1, 2, 0, 2, 0, 2, 1, 0, 1, 1]);
    let report = runner.run(&mut source).unwrap();

    let line = encode_report(&report).unwrap();
    assert!(!line.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["initial_safe"], true);
    assert_eq!(value["safe_sequence"], serde_json::json!([0, 1]));
    assert_eq!(value["steps"][0]["request"], serde_json::json!([1, 1]));

    let pretty = encode_json(&report).unwrap();
    assert!(pretty.contains('\n'));
}
