//! Session manager and token lifecycle tests

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;
use voter_sheets::models::Session;
use voter_sheets::session::{
    decode_token, encode_token, AuthError, SessionManager, DEMO_PASSWORD, DEMO_USERNAME,
};

use crate::common::logging;

fn manager_in(dir: &tempfile::TempDir) -> SessionManager {
    SessionManager::new(dir.path().join("auth_token"))
}

#[test]
fn demo_credential_logs_in_and_any_other_pair_fails() {
    logging::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut sessions = manager_in(&dir);

    for (user, pass) in [
        ("admin@gmail.com", "wrong"),
        ("user@example.com", "test@123"),
        ("", ""),
    ] {
        assert_matches!(
            sessions.login(user, pass),
            Err(AuthError::InvalidCredentials)
        );
    }

    let session = sessions.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
    assert_eq!(session.id, "1");
    assert_eq!(session.username, DEMO_USERNAME);
    assert!(sessions.current().is_some());
}

#[test]
fn an_expired_token_is_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("auth_token");

    // Plant a token whose expiry has long passed
    let stale = Session {
        id: "1".to_string(),
        username: DEMO_USERNAME.to_string(),
        exp: 0,
    };
    std::fs::write(&token_path, encode_token(&stale)).unwrap();

    let mut sessions = SessionManager::new(&token_path);
    assert_eq!(sessions.restore(), None);
    // Logout side effects: file gone, no in-memory session
    assert!(!token_path.exists());
    assert!(sessions.current().is_none());
}

#[test]
fn register_always_succeeds_and_restores() {
    let dir = tempfile::tempdir().unwrap();
    let mut sessions = manager_in(&dir);

    let session = sessions.register("anyone@anywhere.com", "pw").unwrap();
    assert_eq!(session.id, "2");

    let mut fresh = manager_in(&dir);
    let restored = fresh.restore().expect("fresh token should restore");
    assert_eq!(restored.username, "anyone@anywhere.com");
}

#[test]
fn tokens_are_base64_json_of_the_session_triple() {
    let session = Session {
        id: "1".to_string(),
        username: "admin@gmail.com".to_string(),
        exp: 42,
    };
    let token = encode_token(&session);
    assert_eq!(decode_token(&token), Some(session));
    assert_eq!(decode_token("corrupted"), None);
}
