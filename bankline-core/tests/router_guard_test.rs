//! Route resolution against real storage
//!
//! The guard reads the token and user from durable storage exactly as a
//! fresh `bl` process would.

use tempfile::TempDir;

use bankline_core::adapters::file_storage::JsonFileStorage;
use bankline_core::adapters::memory_storage::MemoryStorage;
use bankline_core::ports::{KeyValueStorage, TOKEN_KEY, USER_KEY};
use bankline_core::router::{guard_with_storage, navigate, route_table, Navigation, Route};

fn dashboard(id: &str) -> Route {
    Route::Dashboard {
        user_id: id.to_string(),
    }
}

#[test]
fn test_beneficiaries_without_token_redirects_to_login() {
    let storage = MemoryStorage::new();
    assert_eq!(
        guard_with_storage(&Route::Beneficiaries, &storage).unwrap(),
        Navigation::Redirect(Route::Login)
    );
    assert_eq!(navigate("/beneficiaries", &storage).unwrap().route, Route::Login);
}

#[test]
fn test_login_with_session_redirects_to_dashboard() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, r#"{"id": 7}"#)]);
    assert_eq!(
        guard_with_storage(&Route::Login, &storage).unwrap(),
        Navigation::Redirect(dashboard("7"))
    );
    let resolved = navigate("/login", &storage).unwrap();
    assert_eq!(resolved.route, dashboard("7"));
    assert_eq!(resolved.redirects, vec![Route::Login]);
}

#[test]
fn test_login_with_token_and_malformed_user_stays_on_login() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "not json")]);
    assert_eq!(
        guard_with_storage(&Route::Login, &storage).unwrap(),
        Navigation::Proceed
    );
}

#[test]
fn test_every_protected_route_is_guarded() {
    let storage = MemoryStorage::new();
    for route in route_table().into_iter().filter(|r| r.requires_auth()) {
        let path = match &route {
            Route::Dashboard { .. } => "/dashboard/1".to_string(),
            other => other.path(),
        };
        let resolved = navigate(&path, &storage).unwrap();
        assert_eq!(resolved.route, Route::Login, "{} was not guarded", path);
    }
}

#[test]
fn test_signed_in_user_enters_protected_routes() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, r#"{"id": "7"}"#)]);
    let resolved = navigate("/transactions", &storage).unwrap();
    assert_eq!(resolved.route, Route::Transactions);
    assert!(!resolved.was_redirected());
}

#[test]
fn test_guard_reads_file_storage_written_by_another_instance() {
    let temp_dir = TempDir::new().unwrap();
    {
        let writer = JsonFileStorage::in_dir(temp_dir.path());
        writer.set(TOKEN_KEY, "tok").unwrap();
        writer.set(USER_KEY, r#"{"id": 12, "name": "Ada"}"#).unwrap();
    }

    let reader = JsonFileStorage::in_dir(temp_dir.path());
    assert_eq!(navigate("/", &reader).unwrap().route, dashboard("12"));

    reader.remove(TOKEN_KEY).unwrap();
    assert_eq!(navigate("/deposit", &reader).unwrap().route, Route::Login);
}
