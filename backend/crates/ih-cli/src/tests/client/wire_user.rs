use crate::{ClientError, WireUser};

use ih_core::{Role, UserRecord};

use serde_json::json;

fn wire(role: &str, id: &str) -> WireUser {
    serde_json::from_value(json!({
        "id": id,
        "external_identity_id": "auth0|123",
        "display_name": "Ann Lee",
        "email": "ann@example.com",
        "avatar_url": null,
        "role": role,
        "created_at": 1704067200,
        "updated_at": 1704067260
    }))
    .unwrap()
}

#[test]
fn test_wire_user_converts_to_record() {
    let record =
        UserRecord::try_from(wire("interviewer", "00000000-0000-0000-0000-000000000001")).unwrap();

    assert_eq!(record.external_identity_id, "auth0|123");
    assert_eq!(record.role, Role::Interviewer);
    assert_eq!(record.created_at.timestamp(), 1704067200);
    assert_eq!(record.updated_at.timestamp(), 1704067260);
    assert!(record.avatar_url.is_none());
}

#[test]
fn test_wire_user_unknown_role_rejected() {
    let result = UserRecord::try_from(wire("admin", "00000000-0000-0000-0000-000000000001"));
    assert!(matches!(result, Err(ClientError::Decode { .. })));
}

#[test]
fn test_wire_user_bad_id_rejected() {
    let result = UserRecord::try_from(wire("candidate", "not-a-uuid"));
    assert!(matches!(result, Err(ClientError::Decode { .. })));
}
