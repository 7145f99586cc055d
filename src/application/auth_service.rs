use crate::domain::error::DomainError;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::session::Session;
use crate::domain::user::{LoginForm, NewUser, User};
use crate::domain::validation::canonical_email;
use crate::infrastructure::security::{
    decode_session_token, hash_password, issue_session_token, verify_password,
};
use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Registration, local-strategy login and server-side sessions.
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repository: Arc<U>,
    session_repository: Arc<S>,
    session_secret: String,
    session_ttl_secs: i64,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(
        user_repository: Arc<U>,
        session_repository: Arc<S>,
        session_secret: String,
        session_ttl_secs: i64,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            session_secret,
            session_ttl_secs,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: NewUser) -> Result<User> {
        trace!("Starting user registration");

        if self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .is_some()
        {
            warn!(email = %req.email, "User already exists");
            return Err(DomainError::EmailTaken.into());
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            first_name: req.first_name,
            surname: req.surname,
            email: req.email,
            password_hash,
            is_admin: req.is_admin,
            created_at: Utc::now(),
        };

        debug!(user_id = %user.id, email = %user.email, "Saving user to repository");
        // The store re-checks uniqueness, covering a race with the lookup above.
        self.user_repository.insert_user(user.clone()).await?;

        info!(
            user_id = %user.id,
            email = %user.email,
            is_admin = user.is_admin,
            "User registered successfully"
        );

        Ok(user)
    }

    /// Verifies an email/password pair. Unknown emails and wrong passwords
    /// fail identically.
    #[instrument(skip(self, password), fields(email = email))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = canonical_email(email);
        let user = self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "User not found during login");
                DomainError::Unauthorized("Invalid email or password".to_string())
            })?;

        let is_valid = verify_password(password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized("Invalid email or password".to_string()).into());
        }

        Ok(user)
    }

    /// Authenticates and opens a session, returning the user and the token
    /// for the session cookie.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginForm) -> Result<(User, String)> {
        let user = self.authenticate(&req.email, &req.password).await?;
        let token = self.open_session(&user).await?;
        info!(user_id = %user.id, "Login successful");
        Ok((user, token))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn open_session(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            created_at: now,
            expires_at: now + Duration::seconds(self.session_ttl_secs),
        };

        let token = issue_session_token(
            &user.id,
            &session.id,
            &self.session_secret,
            self.session_ttl_secs,
        )
        .map_err(|e| {
            error!(error = %e, "Failed to issue session token");
            DomainError::Internal(format!("Failed to issue session token: {}", e))
        })?;

        self.session_repository.delete_expired(now).await?;

        debug!(session_id = %session.id, "Opening session");
        self.session_repository.save_session(session).await?;
        Ok(token)
    }

    /// Maps a session cookie to its user. Returns `None` for tampered or
    /// expired tokens, sessions that were logged out, and users that no
    /// longer exist.
    #[instrument(skip(self, token))]
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>> {
        let claims = match decode_session_token(token, &self.session_secret) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejecting session token");
                return Ok(None);
            }
        };

        let Some(session) = self.session_repository.find_session(&claims.sid).await? else {
            debug!(session_id = %claims.sid, "Session no longer exists");
            return Ok(None);
        };

        if session.user_id != claims.sub {
            warn!(session_id = %session.id, "Session does not belong to token subject");
            return Ok(None);
        }

        if session.is_expired() {
            debug!(session_id = %session.id, "Session expired");
            self.session_repository.delete_session(&session.id).await?;
            return Ok(None);
        }

        self.user_repository.find_user_by_id(&session.user_id).await
    }

    /// Invalidates the session behind the token. Unreadable tokens are
    /// ignored since there is nothing to invalidate.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<()> {
        match decode_session_token(token, &self.session_secret) {
            Ok(claims) => {
                let removed = self.session_repository.delete_session(&claims.sid).await?;
                info!(user_id = %claims.sub, session_id = %claims.sid, removed, "Logged out");
            }
            Err(e) => debug!(error = %e, "Logout with unreadable session token"),
        }
        Ok(())
    }

    /// Creates the configured administrator unless that email is already
    /// registered.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<()> {
        let email = canonical_email(email);
        if self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .is_some()
        {
            debug!(email = %email, "Admin account already present");
            return Ok(());
        }

        self.register_user(NewUser {
            first_name: "Site".to_string(),
            surname: "Administrator".to_string(),
            email,
            password: password.to_string(),
            is_admin: true,
        })
        .await?;
        Ok(())
    }
}
