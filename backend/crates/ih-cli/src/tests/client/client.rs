use crate::{Client, ClientError};

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = Client::new("http://localhost:8000/", None, None);
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn test_base_url_no_trailing_slash() {
    let client = Client::new("http://localhost:8000", None, None);
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn test_user_id_stored() {
    let client = Client::new("http://localhost:8000", Some("auth0|123"), None);
    assert_eq!(client.user_id, Some("auth0|123".to_string()));
    assert!(client.token.is_none());
}

#[test]
fn test_token_stored() {
    let client = Client::new("http://localhost:8000", None, Some("abc.def.ghi"));
    assert_eq!(client.token, Some("abc.def.ghi".to_string()));
    assert!(client.user_id.is_none());
}

#[test]
fn test_api_error_exposes_code() {
    let err = ClientError::api_error("NOT_FOUND".into(), "User not found".into());
    assert_eq!(err.code(), Some("NOT_FOUND"));
    assert!(err.to_string().contains("User not found"));
}

#[test]
fn test_decode_error_has_no_code() {
    let err = ClientError::decode("bad id");
    assert_eq!(err.code(), None);
}
