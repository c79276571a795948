use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{Config, ListPolicy};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

#[test]
fn given_known_literals_when_parse_list_policy_then_ok() {
    assert_that!(
        ListPolicy::from_str("any_authenticated"),
        ok(eq(&ListPolicy::AnyAuthenticated))
    );
    assert_that!(
        ListPolicy::from_str("interviewers_only"),
        ok(eq(&ListPolicy::InterviewersOnly))
    );
}

#[test]
fn given_list_policy_when_displayed_then_matches_config_literal() {
    assert_that!(
        ListPolicy::InterviewersOnly.to_string().as_str(),
        eq("interviewers_only")
    );
}

#[test]
#[serial]
fn given_unknown_list_policy_env_when_load_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _policy = EnvGuard::set("IH_DIRECTORY_LIST_POLICY", "everyone");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("everyone"));
}

#[test]
#[serial]
fn given_unknown_list_policy_in_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[directory]\nlist_policy = \"admins\"");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_feed_capacity_zero_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _capacity = EnvGuard::set("IH_DIRECTORY_FEED_CAPACITY", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("directory.feed_capacity"));
}

#[test]
#[serial]
fn given_default_feed_capacity_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}
