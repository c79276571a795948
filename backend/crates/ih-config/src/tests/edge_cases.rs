use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[server\nport = ");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring(crate::CONFIG_FILE_NAME));
}

#[test]
#[serial]
fn given_database_path_with_traversal_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _path = EnvGuard::set("IH_DATABASE_PATH", "../outside.db");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("database.path"));
}

#[test]
#[serial]
fn given_absolute_database_path_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _path = EnvGuard::set("IH_DATABASE_PATH", "/tmp/users.db");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_log_file_with_traversal_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("IH_LOG_FILE", "../../server.log");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("logging.file"));
}

#[test]
#[serial]
fn given_zero_database_pool_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _pool = EnvGuard::set("IH_DATABASE_MAX_CONNECTIONS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("database.max_connections"));
}

#[test]
#[serial]
fn given_database_pool_override_when_load_then_applied() {
    let (_temp, _guard) = setup_config_dir();
    let _pool = EnvGuard::set("IH_DATABASE_MAX_CONNECTIONS", "4");

    let config = Config::load().unwrap();

    assert_that!(config.database.max_connections, eq(4));
    assert_that!(config.validate(), ok(anything()));
}
