//! Login → update → invalidate → re-login against a real credentials file.

use std::sync::Arc;

use ff_auth::{AuthContext, guard, open_store};
use ff_config::{AuthConfig, StorageBackend};
use ff_core::{Route, UserPatch, UserProfile, UserRecord};
use pretty_assertions::assert_eq;

fn file_config(dir: &tempfile::TempDir) -> AuthConfig {
    AuthConfig {
        storage: StorageBackend::File,
        credentials_path: dir.path().join("user.json").display().to_string(),
        ..AuthConfig::default()
    }
}

fn record() -> UserRecord {
    UserRecord {
        token: "jwt-token".into(),
        user: UserProfile {
            username: Some("alex".into()),
            email: Some("alex@example.com".into()),
            ..UserProfile::default()
        },
    }
}

#[test]
fn state_survives_a_restart_through_the_file_store() {
    let dir = tempfile::TempDir::new().expect("tmp");
    let config = file_config(&dir);

    let ctx = AuthContext::hydrate(open_store(&config).expect("store"));
    ctx.login(record()).expect("login");
    ctx.update_user(UserPatch {
        has_taken_test: Some(true),
        ..UserPatch::default()
    })
    .expect("update");

    let restarted = AuthContext::hydrate(open_store(&config).expect("store"));
    let state = restarted.state();
    assert_eq!(state.token(), Some("jwt-token"));
    assert!(state.has_taken_test());
    assert_eq!(guard(Route::Dashboard, &state), Route::Dashboard);
    assert_eq!(restarted.token_source().as_deref(), Some("file"));
}

#[test]
fn invalidation_logs_out_across_restarts() {
    let dir = tempfile::TempDir::new().expect("tmp");
    let config = file_config(&dir);

    let ctx = Arc::new(AuthContext::hydrate(open_store(&config).expect("store")));
    ctx.login(record()).expect("login");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            std::thread::spawn(move || ctx.invalidate())
        })
        .collect();
    let cleared = handles
        .into_iter()
        .map(|h| h.join().expect("join"))
        .filter(|did_clear| *did_clear)
        .count();
    assert_eq!(cleared, 1);

    let restarted = AuthContext::hydrate(open_store(&config).expect("store"));
    assert!(!restarted.is_authenticated());
    assert_eq!(guard(Route::Test, &restarted.state()), Route::Login);
}
