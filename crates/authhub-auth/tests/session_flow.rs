//! End-to-end session lifecycle tests driven through in-memory doubles.
//!
//! The manager is wired exactly as in production, with the storage and
//! directory seams replaced by hash-map implementations and the clock
//! pinned to a controllable instant.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use authhub_auth::jwt::{TokenIssuer, TokenVerifier};
use authhub_auth::password::PasswordHasher;
use authhub_auth::session::{PrincipalDirectory, RefreshSessionStore, SessionManager};
use authhub_core::clock::Clock;
use authhub_core::config::auth::AuthConfig;
use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::{NewRefreshSession, RefreshSession};
use authhub_entity::user::{CreateUser, User};

#[derive(Debug)]
struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    fn at(instant: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(instant)))
    }

    fn advance(&self, by: Duration) {
        let mut guard = self.0.lock().unwrap();
        *guard += by;
    }
}

impl Clock for MutableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Debug, Default)]
struct InMemoryStore {
    sessions: Mutex<HashMap<Uuid, RefreshSession>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    fn get(&self, session_id: Uuid) -> Option<RefreshSession> {
        self.sessions.lock().unwrap().get(&session_id).cloned()
    }

    fn count_for_user(&self, user_id: i64) -> usize {
        self.sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl RefreshSessionStore for InMemoryStore {
    async fn save(&self, session: NewRefreshSession) -> AppResult<RefreshSession> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.session_id) {
            return Err(AppError::duplicate_session(format!(
                "Session {} already exists",
                session.session_id
            )));
        }

        let record = RefreshSession {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            session_id: session.session_id,
            token_digest: session.token_digest,
            revoked: false,
            created_at: Utc::now(),
            expires_at: session.expires_at,
            user_id: session.user_id,
        };
        sessions.insert(record.session_id, record.clone());
        Ok(record)
    }

    async fn find_by_session_id(&self, session_id: Uuid) -> AppResult<Option<RefreshSession>> {
        Ok(self.get(session_id))
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let mut revoked = 0;
        for session in sessions.values_mut() {
            if session.user_id == user_id {
                session.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[derive(Debug, Default)]
struct InMemoryDirectory {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryDirectory {
    fn remove(&self, user_id: i64) {
        self.users.lock().unwrap().retain(|u| u.id != user_id);
    }
}

#[async_trait]
impl PrincipalDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_secret_code(&self, code: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.secret_code.as_deref() == Some(code))
            .cloned())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == data.email) {
            return Err(AppError::email_taken("Email already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: data.email,
            password_hash: data.password_hash,
            secret_code: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn set_secret_code(&self, user_id: i64, code: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
        user.secret_code = Some(code.to_string());
        Ok(user.clone())
    }
}

struct Harness {
    manager: SessionManager,
    store: Arc<InMemoryStore>,
    directory: Arc<InMemoryDirectory>,
    verifier: TokenVerifier,
    clock: Arc<MutableClock>,
}

fn harness_at(instant: DateTime<Utc>) -> Harness {
    let config = AuthConfig {
        access_secret: "access-secret-for-tests".to_string(),
        refresh_secret: "refresh-secret-for-tests".to_string(),
        access_expires_in: "15m".to_string(),
        refresh_expires_in: "7d".to_string(),
    };

    let clock = MutableClock::at(instant);
    let store = Arc::new(InMemoryStore::default());
    let directory = Arc::new(InMemoryDirectory::default());

    let issuer = Arc::new(TokenIssuer::new(&config, clock.clone()).unwrap());
    let verifier = TokenVerifier::new(&config);
    let manager = SessionManager::new(
        issuer,
        Arc::new(verifier.clone()),
        store.clone(),
        directory.clone(),
        Arc::new(PasswordHasher::new()),
    );

    Harness {
        manager,
        store,
        directory,
        verifier,
        clock,
    }
}

fn harness() -> Harness {
    harness_at(Utc::now())
}

#[tokio::test]
async fn test_register_refresh_logout_lifecycle() {
    let h = harness();

    // Register: credentials issued, session persisted unrevoked.
    let session = h.manager.register("a@x.com", "password1").await.unwrap();
    assert_eq!(session.user.id, 1);
    assert_eq!(session.user.email, "a@x.com");

    let claims = h
        .verifier
        .verify_refresh(&session.tokens.refresh_token)
        .unwrap();
    let record = h.store.get(claims.sid).unwrap();
    assert!(!record.revoked);
    assert_eq!(record.user_id, 1);

    // Refresh: fresh access token, same refresh token, session untouched.
    h.clock.advance(Duration::seconds(1));
    let refreshed = h
        .manager
        .refresh(&session.tokens.refresh_token)
        .await
        .unwrap();
    assert_ne!(refreshed.tokens.access_token, session.tokens.access_token);
    assert_eq!(refreshed.tokens.refresh_token, session.tokens.refresh_token);
    assert!(!h.store.get(claims.sid).unwrap().revoked);

    // Logout: revocation is one-way and visible to the next refresh.
    h.manager.logout(1).await.unwrap();
    assert!(h.store.get(claims.sid).unwrap().revoked);

    let err = h
        .manager
        .refresh(&session.tokens.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SessionRevokedOrMissing);
}

#[tokio::test]
async fn test_second_register_with_same_email_fails() {
    let h = harness();
    h.manager.register("a@x.com", "password1").await.unwrap();

    let err = h
        .manager
        .register("a@x.com", "password2")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmailTaken);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    h.manager.register("a@x.com", "password1").await.unwrap();

    let wrong_password = h.manager.login("a@x.com", "password2").await.unwrap_err();
    let unknown_email = h.manager.login("b@x.com", "password1").await.unwrap_err();

    assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
    assert_eq!(unknown_email.kind, ErrorKind::InvalidCredentials);
    assert_eq!(wrong_password.message, unknown_email.message);
}

#[tokio::test]
async fn test_concurrent_sessions_per_principal_are_supported() {
    let h = harness();
    h.manager.register("a@x.com", "password1").await.unwrap();

    h.manager.login("a@x.com", "password1").await.unwrap();
    h.manager.login("a@x.com", "password1").await.unwrap();

    // One from registration, two from the logins.
    assert_eq!(h.store.count_for_user(1), 3);
}

#[tokio::test]
async fn test_logout_revokes_only_the_owning_principal() {
    let h = harness();
    let alice = h.manager.register("a@x.com", "password1").await.unwrap();
    let bob = h.manager.register("b@x.com", "password1").await.unwrap();

    h.manager.logout(alice.user.id).await.unwrap();

    let err = h
        .manager
        .refresh(&alice.tokens.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SessionRevokedOrMissing);

    // Bob's credential is unaffected.
    h.manager.refresh(&bob.tokens.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let h = harness();
    h.manager.register("a@x.com", "password1").await.unwrap();

    h.manager.logout(1).await.unwrap();
    h.manager.logout(1).await.unwrap();

    // A principal with no sessions also succeeds.
    h.manager.logout(999).await.unwrap();
}

#[tokio::test]
async fn test_refresh_after_principal_removal_fails() {
    let h = harness();
    let session = h.manager.register("a@x.com", "password1").await.unwrap();

    // Cascade deletion of the session rows is a storage concern; the
    // lookup order means the missing principal is what surfaces here.
    h.directory.remove(session.user.id);

    let err = h
        .manager
        .refresh(&session.tokens.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PrincipalNotFound);
}

#[tokio::test]
async fn test_refresh_with_expired_token_fails_invalid_token() {
    // Issue everything eight days ago so the 7d refresh lifetime has
    // already elapsed by real verification time.
    let h = harness_at(Utc::now() - Duration::days(8));
    let session = h.manager.register("a@x.com", "password1").await.unwrap();

    let err = h
        .manager
        .refresh(&session.tokens.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_fails_invalid_token() {
    let h = harness();

    let err = h.manager.refresh("junk").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);

    // An access token is not accepted in the refresh context either.
    let session = h.manager.register("a@x.com", "password1").await.unwrap();
    let err = h
        .manager
        .refresh(&session.tokens.access_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_revocation_is_permitted_after_expiry() {
    let h = harness_at(Utc::now() - Duration::days(8));
    let session = h.manager.register("a@x.com", "password1").await.unwrap();
    let claims_sid = {
        // Decode without expiry validation is unnecessary; the store
        // still holds exactly one row for the user.
        let sessions = h.store.sessions.lock().unwrap();
        *sessions.keys().next().unwrap()
    };

    h.manager.logout(session.user.id).await.unwrap();
    assert!(h.store.get(claims_sid).unwrap().revoked);
}
