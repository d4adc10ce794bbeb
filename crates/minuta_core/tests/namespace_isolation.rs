//! End-to-end checks that one account's templates and history are never
//! visible from another account's session.

use minuta_core::db::open_db_in_memory;
use minuta_core::{
    ContentGenerator, Identity, MemorySessionStore, MinutesService, SectionContent,
    SessionManager, SqliteBlobRepository, SqliteSessionStore, Template, TemplateService,
};
use std::collections::BTreeMap;

struct TitleGenerator;

impl ContentGenerator for TitleGenerator {
    fn generate_content(
        &self,
        transcript: &str,
        _section_names: &[String],
    ) -> BTreeMap<String, SectionContent> {
        BTreeMap::from([(
            "Title".to_string(),
            SectionContent::Text(transcript.to_string()),
        )])
    }
}

#[test]
fn templates_saved_under_one_identity_stay_invisible_to_another() {
    let conn = open_db_in_memory().unwrap();
    let mut session = SessionManager::new(
        SqliteSessionStore::try_new(&conn).unwrap(),
        MemorySessionStore::new(),
    );
    let repo = SqliteBlobRepository::try_new(&conn).unwrap();

    session.sign_in(Identity::new("alice@example.com"), true).unwrap();
    let mut templates = TemplateService::new(repo, session.active_namespace()).unwrap();
    templates
        .upsert(Template::new("Alice Only", "", vec!["Title".to_string()]))
        .unwrap();
    assert!(templates.select("alice-only").is_some());

    // Switching identity reloads the working set from the new namespace.
    session.sign_in(Identity::new("bob@example.com"), true).unwrap();
    templates.load_namespace(session.active_namespace()).unwrap();
    assert!(templates.select("alice-only").is_none());
    assert_eq!(templates.list().len(), 3);

    // Alice's data is still there when she signs back in.
    session.sign_in(Identity::new("alice@example.com"), true).unwrap();
    templates.load_namespace(session.active_namespace()).unwrap();
    assert!(templates.select("alice-only").is_some());
}

#[test]
fn history_saved_under_one_identity_stays_invisible_to_another() {
    let conn = open_db_in_memory().unwrap();
    let mut session = SessionManager::new(
        SqliteSessionStore::try_new(&conn).unwrap(),
        MemorySessionStore::new(),
    );
    let repo = SqliteBlobRepository::try_new(&conn).unwrap();
    let template = Template::new("Sync", "", vec!["Title".to_string()]);

    session.sign_in(Identity::new("alice@example.com"), true).unwrap();
    let mut minutes =
        MinutesService::new(repo, TitleGenerator, session.active_namespace()).unwrap();
    minutes.generate("Alice's meeting", &template).unwrap();

    session.sign_in(Identity::new("bob@example.com"), true).unwrap();
    minutes.load_namespace(session.active_namespace()).unwrap();
    assert!(minutes.history().is_empty());

    session.sign_in(Identity::new("alice@example.com"), true).unwrap();
    minutes.load_namespace(session.active_namespace()).unwrap();
    assert_eq!(minutes.history().len(), 1);
    assert_eq!(minutes.history()[0].title, "Alice's meeting");
}

#[test]
fn guest_namespace_is_isolated_from_accounts_and_survives_sign_out() {
    let conn = open_db_in_memory().unwrap();
    let mut session = SessionManager::new(
        SqliteSessionStore::try_new(&conn).unwrap(),
        MemorySessionStore::new(),
    );
    let repo = SqliteBlobRepository::try_new(&conn).unwrap();

    // Anonymous user saves a template under the guest namespace.
    let mut templates = TemplateService::new(repo, session.active_namespace()).unwrap();
    templates
        .upsert(Template::new("Guest Draft", "", vec!["Title".to_string()]))
        .unwrap();

    session.sign_in(Identity::new("alice@example.com"), true).unwrap();
    templates.load_namespace(session.active_namespace()).unwrap();
    assert!(templates.select("guest-draft").is_none());

    // Sign-out returns to the guest namespace with its data intact.
    session.sign_out().unwrap();
    templates.load_namespace(session.active_namespace()).unwrap();
    assert!(templates.select("guest-draft").is_some());
}
