// tests/error_handling.rs

use depdag::config::load_and_validate;
use depdag::errors::DepdagError;
use depdag::input::{load_dependency_map, load_task_list};
use depdag_test_utils::write_temp;

#[test]
fn test_task_cycle_is_reported_as_cycle_error() {
    let file = write_temp(
        r#"[
            {"id": "A", "duration": 1, "dependencies": ["B"]},
            {"id": "B", "duration": 1, "dependencies": ["A"]}
        ]"#,
        ".json",
    )
    .unwrap();

    let tasks = load_task_list(file.path()).unwrap();
    match depdag::compute_schedule(&tasks) {
        Err(DepdagError::Cycle { tasks, .. }) => assert_eq!(tasks.len(), 2),
        Err(e) => panic!("Expected Cycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_task_dependency_returns_validation_error() {
    let file = write_temp(
        r#"[{"id": "A", "duration": 1, "dependencies": ["NonExistent"]}]"#,
        ".json",
    )
    .unwrap();

    match load_task_list(file.path()) {
        Err(DepdagError::Validation(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("NonExistent"));
        }
        Err(e) => panic!("Expected Validation error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_negative_duration_returns_validation_error() {
    let file = write_temp(r#"[{"id": "A", "duration": -2}]"#, ".json").unwrap();

    match load_task_list(file.path()) {
        Err(DepdagError::Validation(msg)) => assert!(msg.contains("negative duration")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_unknown_module_returns_validation_error() {
    let file = write_temp(r#"{"api": ["core"]}"#, ".json").unwrap();

    match load_dependency_map(file.path()) {
        Err(DepdagError::Validation(msg)) => assert!(msg.contains("'core'")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_repeated_module_key_returns_json_error() {
    let file = write_temp(r#"{"a": ["b"], "b": ["a"], "b": []}"#, ".json").unwrap();

    match load_dependency_map(file.path()) {
        Err(DepdagError::Json(e)) => assert!(e.to_string().contains("duplicate module 'b'")),
        other => panic!("Expected Json error, got: {:?}", other),
    }
}

#[test]
fn test_malformed_json_returns_json_error() {
    let file = write_temp(r#"[{"id": "A""#, ".json").unwrap();
    assert!(matches!(load_task_list(file.path()), Err(DepdagError::Json(_))));
}

#[test]
fn test_wrong_document_shape_returns_json_error() {
    let file = write_temp(r#"{"A": []}"#, ".json").unwrap();
    assert!(matches!(load_task_list(file.path()), Err(DepdagError::Json(_))));
}

#[test]
fn test_missing_file_returns_io_error() {
    let result = load_task_list("/definitely/not/here.json");
    assert!(matches!(result, Err(DepdagError::Io(_))));
}

#[test]
fn test_invalid_config_value_returns_config_error() {
    let file = write_temp(
        r#"
[cycles]
coupling_threshold = 2.0
"#,
        ".toml",
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(DepdagError::Config(msg)) => assert!(msg.contains("coupling_threshold")),
        other => panic!("Expected Config error, got: {:?}", other),
    }
}

#[test]
fn test_unknown_config_key_returns_toml_error() {
    let file = write_temp(
        r#"
[report]
colour = "always"
"#,
        ".toml",
    )
    .unwrap();

    assert!(matches!(load_and_validate(file.path()), Err(DepdagError::Toml(_))));
}

#[test]
fn test_valid_config_is_loaded() {
    let file = write_temp(
        r#"
[report]
format = "json"
precision = 3

[schedule]
slack_epsilon = 0.001
"#,
        ".toml",
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.report.format, depdag::types::OutputFormat::Json);
    assert_eq!(cfg.report.precision, 3);
    assert_eq!(cfg.schedule.slack_epsilon, 0.001);
    assert_eq!(cfg.cycles.max_listed, 5);
}
