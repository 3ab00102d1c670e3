//! Authentication service
//!
//! Registration, login and user lookup backed by bcrypt password hashes.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AuthTokenResponse, User};

use super::jwt::{generate_access_token, JwtError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Database(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AuthError::Hash(e.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Token(e.to_string())
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    /// Create a new auth service instance
    pub fn new(db_pool: PgPool, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// JWT signing secret, for the token extractor
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Register a new account and issue an access token
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthTokenResponse, AuthError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                AuthError::EmailTaken
            }
            _ => AuthError::Database(e.to_string()),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        self.issue_token(user)
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokenResponse, AuthError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(user)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.db_pool)
            .await?;
        Ok(users)
    }

    fn issue_token(&self, user: User) -> Result<AuthTokenResponse, AuthError> {
        let access_token = generate_access_token(&user, &self.jwt_secret, self.token_ttl_hours)?;

        Ok(AuthTokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.token_ttl_hours * 3600,
            user: user.into(),
        })
    }
}
