use minuta_core::db::open_db_in_memory;
use minuta_core::{AuthError, CredentialRepository, CredentialService, SqliteCredentialRepository};

#[test]
fn first_contact_registers_then_verifies() {
    let conn = open_db_in_memory().unwrap();
    let service = CredentialService::new(SqliteCredentialRepository::try_new(&conn).unwrap());

    service
        .register_or_verify("alice@example.com", "correct horse")
        .unwrap();
    service
        .register_or_verify("alice@example.com", "correct horse")
        .unwrap();
}

#[test]
fn wrong_password_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = CredentialService::new(SqliteCredentialRepository::try_new(&conn).unwrap());

    service
        .register_or_verify("alice@example.com", "correct horse")
        .unwrap();
    let err = service
        .register_or_verify("alice@example.com", "battery staple")
        .unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword));
}

#[test]
fn email_lookup_is_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = CredentialService::new(SqliteCredentialRepository::try_new(&conn).unwrap());

    service
        .register_or_verify("Alice@Example.COM", "correct horse")
        .unwrap();
    // Same account, different casing: verified, not re-registered.
    service
        .register_or_verify("alice@example.com", "correct horse")
        .unwrap();
    let err = service
        .register_or_verify("ALICE@EXAMPLE.COM", "wrong")
        .unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword));
}

#[test]
fn update_password_rotates_hash_and_salt() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCredentialRepository::try_new(&conn).unwrap();
    let service = CredentialService::new(SqliteCredentialRepository::try_new(&conn).unwrap());

    service
        .register_or_verify("alice@example.com", "old password")
        .unwrap();
    let before = repo.find("alice@example.com").unwrap().unwrap();

    service
        .update_password("alice@example.com", "new password")
        .unwrap();
    let after = repo.find("alice@example.com").unwrap().unwrap();
    assert_ne!(before.password_hash, after.password_hash);

    let err = service
        .register_or_verify("alice@example.com", "old password")
        .unwrap_err();
    assert!(matches!(err, AuthError::IncorrectPassword));
    service
        .register_or_verify("alice@example.com", "new password")
        .unwrap();
}

#[test]
fn stored_hash_is_a_salted_phc_string_not_the_password() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCredentialRepository::try_new(&conn).unwrap();
    let service = CredentialService::new(SqliteCredentialRepository::try_new(&conn).unwrap());

    service
        .register_or_verify("alice@example.com", "plain secret")
        .unwrap();
    let record = repo.find("alice@example.com").unwrap().unwrap();
    assert!(record.password_hash.starts_with("$argon2"));
    assert!(!record.password_hash.contains("plain secret"));
}
