use crate::IdentityAssertion;

use googletest::prelude::*;
use proptest::prelude::*;

#[test]
fn given_first_name_only_when_display_name_then_no_trailing_space() {
    let identity = IdentityAssertion::new("u1").with_first_name("Ann");

    assert_that!(identity.display_name(), eq("Ann"));
}

#[test]
fn given_last_name_only_when_display_name_then_no_leading_space() {
    let identity = IdentityAssertion::new("u1").with_last_name("Lee");

    assert_that!(identity.display_name(), eq("Lee"));
}

#[test]
fn given_no_names_when_display_name_then_empty_string() {
    let identity = IdentityAssertion::new("u1");

    assert_that!(identity.display_name(), eq(""));
}

#[test]
fn given_both_names_when_display_name_then_joined_with_space() {
    let identity = IdentityAssertion::new("u1")
        .with_first_name("Ann")
        .with_last_name("Lee");

    assert_that!(identity.display_name(), eq("Ann Lee"));
}

#[test]
fn given_missing_email_when_to_sync_profile_then_none() {
    let identity = IdentityAssertion::new("u1").with_first_name("Ann");

    assert_that!(identity.is_complete(), eq(false));
    assert_that!(identity.to_sync_profile(), none());
}

#[test]
fn given_empty_email_when_to_sync_profile_then_none() {
    let identity = IdentityAssertion::new("u1").with_email("");

    assert_that!(identity.to_sync_profile(), none());
}

#[test]
fn given_empty_subject_when_to_sync_profile_then_none() {
    let identity = IdentityAssertion::new("").with_email("a@x.com");

    assert_that!(identity.to_sync_profile(), none());
}

#[test]
fn given_complete_identity_when_to_sync_profile_then_fields_copied() {
    let identity = IdentityAssertion::new("u1")
        .with_email("a@x.com")
        .with_first_name("Ann")
        .with_avatar_url("https://img.example/ann.png");

    let profile = identity.to_sync_profile().unwrap();

    assert_that!(profile.external_identity_id, eq("u1"));
    assert_that!(profile.email, eq("a@x.com"));
    assert_that!(profile.display_name, eq("Ann"));
    assert_that!(
        profile.avatar_url.as_deref(),
        some(eq("https://img.example/ann.png"))
    );
}

proptest! {
    #[test]
    fn display_name_never_has_outer_whitespace(
        first in proptest::option::of("[a-zA-Z ]{0,12}"),
        last in proptest::option::of("[a-zA-Z ]{0,12}"),
    ) {
        let identity = IdentityAssertion {
            subject_id: "u1".to_string(),
            first_name: first,
            last_name: last,
            ..Default::default()
        };

        let name = identity.display_name();
        prop_assert_eq!(name.trim(), name.as_str());
    }
}
