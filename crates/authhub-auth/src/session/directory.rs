//! Principal directory seam.
//!
//! Owner-record lookup and creation behind a trait, mirroring the
//! storage seam in `store.rs`.

use std::sync::Arc;

use async_trait::async_trait;

use authhub_core::result::AppResult;
use authhub_database::repositories::user::UserRepository;
use authhub_entity::user::{CreateUser, User};

/// Lookup and creation of principals.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Find a principal by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a principal by ID.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a principal by secret code.
    async fn find_by_secret_code(&self, code: &str) -> AppResult<Option<User>>;

    /// Create a principal with a pre-hashed password verifier.
    ///
    /// Fails with `ErrorKind::EmailTaken` when the email is already
    /// registered.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Set a principal's secret code.
    async fn set_secret_code(&self, user_id: i64, code: &str) -> AppResult<User>;
}

/// Production directory backed by the PostgreSQL repository.
#[derive(Debug, Clone)]
pub struct DbPrincipalDirectory {
    repo: Arc<UserRepository>,
}

impl DbPrincipalDirectory {
    /// Creates a directory wrapping the given repository.
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PrincipalDirectory for DbPrincipalDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    async fn find_by_secret_code(&self, code: &str) -> AppResult<Option<User>> {
        self.repo.find_by_secret_code(code).await
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        self.repo.create(&data).await
    }

    async fn set_secret_code(&self, user_id: i64, code: &str) -> AppResult<User> {
        self.repo.set_secret_code(user_id, code).await
    }
}
