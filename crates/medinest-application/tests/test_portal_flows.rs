//! End-to-end flows through `PortalApp`, over memory and file storage.

use std::collections::HashSet;

use medinest_application::PortalApp;
use medinest_core::navigation::View;
use medinest_core::session::{User, UserType};
use medinest_core::storage::{KeyValueStorage, MemoryStorage};
use medinest_infrastructure::FileKeyValueStorage;
use proptest::prelude::*;
use tempfile::TempDir;

const SESSION_KEYS: [&str; 3] = ["medinest_auth", "medinest_user", "medinest_user_type"];

fn alice() -> User {
    User::new()
        .with_attribute("id", "p-1")
        .with_attribute("name", "Alice")
        .with_attribute("email", "alice@example.com")
}

#[test]
fn login_round_trips_through_file_storage() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("local_storage.json");

    let mut app = PortalApp::start(FileKeyValueStorage::new(path.clone()));
    app.login(alice(), UserType::Patient).unwrap();
    let token = app.user().unwrap().session_token().unwrap().to_string();
    drop(app);

    let restarted = PortalApp::start(FileKeyValueStorage::new(path));
    assert!(restarted.is_authenticated());
    assert_eq!(restarted.user_type(), Some(UserType::Patient));

    let expected = alice().with_attribute(User::SESSION_TOKEN_FIELD, token);
    assert_eq!(restarted.user(), Some(&expected));
    assert_eq!(restarted.current_view(), View::PatientDashboard);
}

#[test]
fn corrupt_file_record_starts_anonymous_and_is_cleared() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("local_storage.json");

    let mut storage = FileKeyValueStorage::new(path.clone());
    storage.set_item("medinest_auth", "true").unwrap();
    storage.set_item("medinest_user", "{\"name\": ").unwrap();
    storage.set_item("medinest_user_type", "patient").unwrap();

    let app = PortalApp::start(FileKeyValueStorage::new(path));
    assert!(app.session().is_ready());
    assert!(!app.is_authenticated());
    assert_eq!(app.current_view(), View::Home);

    let storage = app.into_storage();
    for key in SESSION_KEYS {
        assert_eq!(storage.get_item(key).unwrap(), None, "{key} should be cleared");
    }
}

#[test]
fn logout_twice_matches_logout_once() {
    let mut app = PortalApp::start(MemoryStorage::new());
    app.login(alice(), UserType::Patient).unwrap();

    app.logout().unwrap();
    let once = app.snapshot();
    assert!(app.session_store().storage().is_empty());

    app.logout().unwrap();
    assert_eq!(app.snapshot(), once);
    assert!(app.session_store().storage().is_empty());
}

#[test]
fn signed_in_user_is_moved_off_entry_views() {
    for user_type in [UserType::Patient, UserType::Doctor] {
        for entry in [View::Home, View::PatientAuth, View::DoctorAuth] {
            let mut app = PortalApp::start(MemoryStorage::new());
            app.navigate_to(View::Privacy);
            app.navigate_to(entry);
            app.login(alice(), user_type).unwrap();

            assert_eq!(app.current_view(), View::dashboard_for(user_type));
            assert!(app.history().is_empty());
        }
    }
}

#[test]
fn anonymous_user_never_sees_protected_views() {
    for view in View::all().filter(View::is_protected) {
        let mut app = PortalApp::start(MemoryStorage::new());
        app.login(alice(), UserType::Patient).unwrap();
        app.navigate_to(view);
        assert_eq!(app.current_view(), view);

        app.logout().unwrap();
        assert_eq!(app.current_view(), View::Home, "left on {view}");
        assert!(app.history().is_empty());

        app.navigate_to(view);
        assert_eq!(app.current_view(), View::Home);
    }
}

#[test]
fn back_after_logout_does_not_expose_dashboard() {
    let mut app = PortalApp::start(MemoryStorage::new());
    app.login(alice(), UserType::Patient).unwrap();
    assert_eq!(app.current_view(), View::PatientDashboard);

    app.navigate_to(View::Setup);
    assert_eq!(app.history(), &[View::PatientDashboard]);

    app.logout().unwrap();
    // Setup is public, so logging out there keeps the view and its history.
    assert_eq!(app.current_view(), View::Setup);

    app.go_back();
    assert_eq!(app.current_view(), View::Home);
    assert!(app.history().is_empty());
}

#[test]
fn history_discipline() {
    let mut app = PortalApp::start(MemoryStorage::new());
    app.navigate_to(View::Setup);
    app.navigate_to(View::Privacy);

    app.go_back();
    assert_eq!(app.current_view(), View::Setup);
    assert_eq!(app.history(), &[View::Home]);

    app.go_back();
    assert_eq!(app.current_view(), View::Home);
    assert!(app.history().is_empty());

    app.go_back();
    assert_eq!(app.current_view(), View::Home);
}

#[test]
fn feature_screen_back_returns_to_dashboard() {
    let mut app = PortalApp::start(MemoryStorage::new());
    app.login(alice(), UserType::Patient).unwrap();
    app.navigate_to(View::MedicineReminders);
    app.navigate_to(View::MedicineExpiration);

    app.go_back();
    assert_eq!(app.current_view(), View::MedicineReminders);
    app.go_back();
    assert_eq!(app.current_view(), View::PatientDashboard);
    assert!(!app.can_go_back());

    // Empty history while signed in lands on the dashboard again.
    app.go_back();
    assert_eq!(app.current_view(), View::PatientDashboard);
}

#[test]
fn ten_thousand_logins_yield_distinct_tokens() {
    let mut app = PortalApp::start(MemoryStorage::new());
    let mut tokens = HashSet::new();

    for _ in 0..10_000 {
        app.login(alice(), UserType::Patient).unwrap();
        let token = app.user().unwrap().session_token().unwrap().to_string();
        tokens.insert(token);
    }

    assert_eq!(tokens.len(), 10_000);
}

#[derive(Debug, Clone)]
enum Action {
    Login(UserType),
    Logout,
    Update(String),
}

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Login(UserType::Patient)),
        Just(Action::Login(UserType::Doctor)),
        Just(Action::Logout),
        "[a-z]{1,8}".prop_map(Action::Update),
    ]
}

proptest! {
    #[test]
    fn authenticated_iff_user_and_type_present(actions in prop::collection::vec(any_action(), 0..32)) {
        let mut app = PortalApp::start(MemoryStorage::new());

        for action in actions {
            match action {
                Action::Login(user_type) => { app.login(alice(), user_type).unwrap(); }
                Action::Logout => { app.logout().unwrap(); }
                Action::Update(name) => {
                    let result = app.update_user(User::new().with_attribute("name", name));
                    prop_assert_eq!(result.is_ok(), app.user().is_some());
                }
            }

            let session = app.session();
            prop_assert_eq!(
                session.is_authenticated(),
                session.is_ready() && session.user().is_some() && session.user_type().is_some()
            );
            prop_assert_eq!(session.user().is_some(), session.user_type().is_some());

            // Durable storage mirrors memory after every mutation.
            let restarted = PortalApp::start(app.session_store().storage().clone());
            prop_assert_eq!(restarted.user(), app.user());
            prop_assert_eq!(restarted.user_type(), app.user_type());
        }
    }
}
