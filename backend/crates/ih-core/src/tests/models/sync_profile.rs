use crate::{CoreError, Role, SyncProfile};

use googletest::prelude::*;

fn profile(external_identity_id: &str, email: &str) -> SyncProfile {
    SyncProfile {
        external_identity_id: external_identity_id.to_string(),
        display_name: String::new(),
        email: email.to_string(),
        avatar_url: None,
    }
}

#[test]
fn given_complete_profile_when_validated_then_ok() {
    assert_that!(profile("u1", "a@x.com").validate(), ok(anything()));
}

#[test]
fn given_empty_identity_id_when_validated_then_field_is_named() {
    let result = profile("  ", "a@x.com").validate();

    match result {
        Err(CoreError::Validation { field, .. }) => {
            assert_that!(field.as_deref(), some(eq("external_identity_id")))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_empty_email_when_validated_then_field_is_named() {
    let result = profile("u1", "").validate();

    match result {
        Err(CoreError::Validation { field, .. }) => assert_that!(field.as_deref(), some(eq("email"))),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_profile_when_converted_to_record_then_role_is_candidate() {
    let mut p = profile("u1", "a@x.com");
    p.display_name = "Ann".to_string();

    let record = p.into_new_record();

    assert_that!(record.role, eq(Role::Candidate));
    assert_that!(record.external_identity_id, eq("u1"));
    assert_that!(record.display_name, eq("Ann"));
    assert_that!(record.created_at, eq(record.updated_at));
}
