use serde_json::{Value, json};
use starberry_github::oauth_core::http_client::{HttpResponse, InMemoryHttpClient};
use starberry_github::{ClientCredentials, Github, OAuth2ProviderAdapter, ProviderError};

fn github() -> Github<InMemoryHttpClient> {
    Github::new(ClientCredentials::new("cid", "secret"), InMemoryHttpClient::new())
}

fn check(status: u16, body: Value) -> Result<(), ProviderError> {
    let response = HttpResponse::json(status, &body);
    github().check_response(&response, &body)
}

#[test]
fn test_status_404_is_client_error() {
    let err = check(404, json!({"message": "Not Found"})).unwrap_err();
    match err {
        ProviderError::Client { status, ref message, ref body } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
            assert_eq!(body, &json!({"message": "Not Found"}));
        }
        other => panic!("expected client error, got {:?}", other),
    }
}

#[test]
fn test_error_key_with_200_is_oauth_error() {
    let err = check(200, json!({"error": "bad_verification_code"})).unwrap_err();
    assert!(err.is_oauth_error());
    assert_eq!(err.status_code(), Some(200));
    assert_eq!(err.message(), "bad_verification_code");
}

#[test]
fn test_status_wins_over_error_key() {
    let err = check(401, json!({"error": "unauthorized", "message": "Bad credentials"})).unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.message(), "Bad credentials");
}

#[test]
fn test_success_body_accepted() {
    assert!(check(200, json!({"login": "octocat"})).is_ok());
    assert!(check(200, json!([{"email": "a@x.com"}])).is_ok());
    assert!(check(302, json!({})).is_ok());
}

#[test]
fn test_boundary_statuses() {
    assert!(check(399, json!({})).is_ok());
    assert!(check(400, json!({})).unwrap_err().is_client_error());
    assert!(check(500, json!({})).unwrap_err().is_client_error());
}

#[test]
fn test_null_error_key_is_accepted() {
    assert!(check(200, json!({"login": "octocat", "error": null})).is_ok());
    assert!(check(200, json!({"error": ""})).unwrap_err().is_oauth_error());
}
