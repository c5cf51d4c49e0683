//! Authentication service for account sign-up and sign-in
//!
//! Provides:
//! - The auth configuration (token signing secret)
//! - The error type shared by the credential and token modules
//! - Sign-up: hash the password, create user + account, issue a token
//! - Sign-in: look up the account, verify the password, issue a token

use std::fmt;

use thiserror::Error;

use crate::db::{CreateUser, Database, UserRecord};

use super::credentials::{hash_password, verify_password};
use super::tokens::TokenService;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("SECRET_KEY is not configured")]
    MissingSecret,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to create token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl AuthError {
    /// Whether this error is caused by the caller's credentials rather than
    /// by the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::EmailTaken | AuthError::AccountNotFound | AuthError::InvalidCredentials
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Build a config from an explicit secret. An empty secret is rejected.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, AuthError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self { jwt_secret })
    }
}

impl TryFrom<&crate::config::Config> for AuthConfig {
    type Error = AuthError;

    fn try_from(config: &crate::config::Config) -> Result<Self, Self::Error> {
        Self::new(config.secret_key.clone())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Auth Types
// ============================================================================

/// Sign-up input
#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub username: String,
    pub biography: Option<String>,
}

/// Token and user returned after sign-up or sign-in
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: UserRecord,
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    /// Register a new account and its user profile
    pub async fn sign_up(&self, input: SignUpInput) -> Result<AuthSession, AuthError> {
        let password_hash = hash_password(&input.password).await?;

        let (account, user) = self
            .db
            .accounts()
            .create_with_user(
                &password_hash,
                CreateUser {
                    email: input.email,
                    username: input.username,
                    biography: input.biography,
                },
            )
            .await?
            .ok_or(AuthError::EmailTaken)?;

        let token = self.tokens.issue(account.user_id)?;

        tracing::info!(user_id = account.user_id, "Account created");
        Ok(AuthSession { token, user })
    }

    /// Authenticate with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let account = self
            .db
            .accounts()
            .get_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !verify_password(password, &account.password).await {
            tracing::info!(account_id = account.id, "Sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .db
            .users()
            .get_by_id(account.user_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let token = self.tokens.issue(account.user_id)?;

        tracing::info!(user_id = account.user_id, "Signed in");
        Ok(AuthSession { token, user })
    }
}
