use crate::{CallerIdentity, Claims};

use googletest::prelude::*;

#[test]
fn given_full_claims_when_converted_then_assertion_is_complete() {
    let claims = Claims {
        sub: "u1".to_string(),
        email: Some("a@x.com".to_string()),
        given_name: Some("Ann".to_string()),
        family_name: Some("Lee".to_string()),
        picture: Some("https://img/ann.png".to_string()),
        exp: 0,
        iat: 0,
    };

    let assertion = CallerIdentity::from_claims(claims).to_identity_assertion();

    assert_that!(assertion.subject_id.as_str(), eq("u1"));
    assert_that!(assertion.display_name().as_str(), eq("Ann Lee"));
    assert_that!(assertion.avatar_url.as_deref(), some(eq("https://img/ann.png")));
    assert_that!(assertion.is_complete(), eq(true));
}

#[test]
fn given_dev_header_subject_when_converted_then_assertion_incomplete() {
    let caller = CallerIdentity::from_subject("u2");

    let assertion = caller.to_identity_assertion();

    assert_that!(caller.external_identity_id.as_str(), eq("u2"));
    assert_that!(assertion.primary_email, none());
    assert_that!(assertion.is_complete(), eq(false));
}
