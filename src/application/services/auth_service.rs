//! Registration, login and session verification.

use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::services::TokenService;
use crate::domain::entities::{LoginAttempt, NewAccount, NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
}

/// Service for user accounts and session tokens.
///
/// Passwords are hashed with Argon2id on a blocking thread; session tokens are
/// stateless and verified with [`TokenService`] on every protected request.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    tokens: TokenService,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is malformed or the password
    /// is shorter than 6 characters.
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, email: &str, password: String) -> Result<User, AppError> {
        let account = NewAccount::new(email, password);
        account.validate()?;
        let NewAccount { email, password } = account;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(email_taken(&email));
        }

        let password_hash = run_blocking(move || hash_password(&password))
            .await?
            .map_err(|e| {
                AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
            })?;

        let user = self
            .repository
            .create(NewUser {
                email: email.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => email_taken(&email),
                other => other,
            })?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a session token valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is malformed or the password
    /// is empty.
    ///
    /// Returns [`AppError::NotFound`] if no user has this email.
    ///
    /// Returns [`AppError::Unauthorized`] if the password does not match.
    pub async fn login(&self, email: &str, password: String) -> Result<Session, AppError> {
        let attempt = LoginAttempt::new(email, password);
        attempt.validate()?;
        let LoginAttempt { email, password } = attempt;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        let stored_hash = user.password_hash.clone();
        let matches = run_blocking(move || verify_password(&password, &stored_hash))
            .await?
            .map_err(|e| {
                AppError::internal(
                    "Stored password hash is unreadable",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        if !matches {
            tracing::debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized(
                "Wrong password, try again",
                json!({}),
            ));
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    /// Verifies a session token and returns the authenticated user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired.
    pub fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        self.tokens.verify(token)
    }
}

fn email_taken(email: &str) -> AppError {
    AppError::conflict("User already exists", json!({ "email": email }))
}

/// Runs CPU-heavy password work off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        AppError::internal("Password worker failed", json!({ "reason": e.to_string() }))
    })
}
