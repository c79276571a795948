use crate::FeedMessage;

use ih_core::{Role, SyncProfile};
use ih_directory::{ChangeKind, UserChange};

use googletest::prelude::*;
use serde_json::json;

fn record() -> ih_core::UserRecord {
    let mut user = SyncProfile {
        external_identity_id: "u1".into(),
        display_name: "Ann".into(),
        email: "a@x.com".into(),
        avatar_url: None,
    }
    .into_new_record();
    user.role = Role::Interviewer;
    user
}

#[test]
fn given_absent_record_when_snapshot_serialized_then_user_is_null() {
    let json = serde_json::to_value(FeedMessage::Snapshot { user: None }).unwrap();

    assert_that!(json, eq(&json!({ "type": "snapshot", "user": null })));
}

#[test]
fn given_list_snapshot_when_serialized_then_typed_as_snapshot() {
    let json = serde_json::to_value(FeedMessage::ListSnapshot { users: vec![] }).unwrap();

    assert_that!(json, eq(&json!({ "type": "snapshot", "users": [] })));
}

#[test]
fn given_role_change_when_converted_then_role_assigned_frame() {
    let message = FeedMessage::from(UserChange::new(ChangeKind::RoleAssigned, record()));

    assert_that!(message.message_type(), eq("role_assigned"));
    let json = serde_json::to_value(&message).unwrap();
    assert_that!(json["type"], eq(&json!("role_assigned")));
    assert_that!(json["user"]["role"], eq(&json!("interviewer")));
    assert_that!(json["user"]["external_identity_id"], eq(&json!("u1")));
}
