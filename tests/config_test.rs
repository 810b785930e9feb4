use std::io::Write;

use pid_loop_monitor::config::{load_or_default, resolve_config, DEFAULT_CONFIG_PATH};
use pid_loop_monitor::{load_config, ControlError, GainBounds, SessionConfig, TimeSource};

#[test]
fn defaults_match_reference_dashboard() {
    let config = SessionConfig::default();
    assert_eq!(config.setpoint, 100.0);
    assert_eq!(config.initial_process_variable, 50.0);
    assert_eq!(config.dt, 0.1);
    assert_eq!((config.gains.kp, config.gains.ki, config.gains.kd), (1.0, 0.1, 0.05));
    assert_eq!(config.alerts.error_threshold, 10.0);
    assert_eq!(config.alerts.output_threshold, 50.0);
    assert_eq!(config.history_capacity, None);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = SessionConfig::from_toml_str(
        r#"
        setpoint = 20.0
        time_source = "simulated"
        history_capacity = 500

        [gains]
        kp = 2.0
        "#,
    )
    .unwrap();

    assert_eq!(config.setpoint, 20.0);
    assert_eq!(config.time_source, TimeSource::Simulated);
    assert_eq!(config.history_capacity, Some(500));
    assert_eq!(config.gains.kp, 2.0);
    assert_eq!(config.gains.ki, 0.1);
    assert_eq!(config.dt, 0.1);
}

#[test]
fn shipped_config_file_is_valid() {
    let config = SessionConfig::from_toml_str(include_str!("../config/session_config.toml")).unwrap();
    assert_eq!(config.gain_bounds, Some(GainBounds::default()));
    assert_eq!(
        SessionConfig { gain_bounds: None, ..config },
        SessionConfig::default()
    );
}

#[test]
fn invalid_values_are_config_errors() {
    for toml in [
        "dt = 0.0",
        "dt = -1.0",
        "alert_log_capacity = 0",
        "[alerts]\nerror_threshold = -1.0",
        "[gain_bounds]\nkp = { min = 2.0, max = 1.0 }\nki = { min = 0.0, max = 1.0 }\nkd = { min = 0.0, max = 1.0 }",
    ] {
        let err = SessionConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ControlError::Config(_)), "{toml}: {err}");
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SessionConfig::from_toml_str("setpoint = \"high\"").unwrap_err();
    assert!(matches!(err, ControlError::Toml(_)));
}

#[test]
fn load_config_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "initial_process_variable = 75.0").unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.initial_process_variable, 75.0);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(load_config(&path), Err(ControlError::Io(_))));
    assert_eq!(load_or_default(&path), SessionConfig::default());
}

#[test]
fn explicit_config_path_must_load_cleanly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dt = 0.0").unwrap();
    assert!(matches!(resolve_config(Some(file.path())), Err(ControlError::Config(_))));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(resolve_config(Some(&missing)), Err(ControlError::Io(_))));
}

#[test]
fn default_config_path_is_resolved_without_a_flag() {
    let config = resolve_config(None).unwrap();
    assert_eq!(config, load_or_default(DEFAULT_CONFIG_PATH));
}
