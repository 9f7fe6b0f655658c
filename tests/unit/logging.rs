//! Unit tests for logging setup

use perpscan::logging::{init_logging, log_format_for, LogFormat};

#[test]
fn test_log_format_by_environment() {
    assert_eq!(log_format_for("production"), LogFormat::Json);
    assert_eq!(log_format_for("prod"), LogFormat::Json);
    assert_eq!(log_format_for("sandbox"), LogFormat::Pretty);
    assert_eq!(log_format_for(""), LogFormat::Pretty);
}

#[test]
fn test_init_logging_twice_is_harmless() {
    init_logging();
    init_logging();
}
