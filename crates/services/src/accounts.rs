//! Account use-cases: registration, login, token authentication, and
//! self-service account maintenance.

use std::sync::Arc;

use domains::{
    CredentialService, DomainError, Identity, Result, User, UserPatch, UserRepo, UserUpdate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

const MIN_FULLNAME_LENGTH: usize = 5;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 20;

/// Structural shape check only; deliverability is not our problem.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Za-z][-0-9A-Za-z.]*[0-9A-Za-z]@([-A-Za-z0-9]+\.){1,2}[-A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Emails are stored and compared in this form; two addresses differing
/// only by case are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration, login and account maintenance over [`UserRepo`] and the
/// credential port.
pub struct AccountService {
    users: Arc<dyn UserRepo>,
    credentials: Arc<dyn CredentialService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepo>, credentials: Arc<dyn CredentialService>) -> Self {
        Self { users, credentials }
    }

    /// Registers a new user. Guards run before any persistence, first
    /// failure wins: duplicate email, full name shape, email shape,
    /// password bounds, confirmation match.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Uuid> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        if full_name.split(' ').filter(|part| !part.is_empty()).count() != 2
            || full_name.len() < MIN_FULLNAME_LENGTH
        {
            return Err(DomainError::Validation("invalid fullname".into()));
        }

        if !EMAIL_RE.is_match(&email) {
            return Err(DomainError::Validation("invalid email".into()));
        }

        if password.len() < MIN_PASSWORD_LENGTH || password.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::Validation("invalid password length".into()));
        }

        if password != confirm_password {
            return Err(DomainError::Validation("passwords do not match".into()));
        }

        let user = User {
            id: Uuid::now_v7(),
            full_name: full_name.to_string(),
            email: email.clone(),
            password_hash: self.credentials.hash_password(password)?,
            created_at: chrono::Utc::now(),
        };
        let id = self.users.insert(user).await?;
        tracing::info!(user = %id, "registered new account");
        Ok(id)
    }

    /// Verifies credentials and issues a signed token for the user.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Identity)> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        if !self.credentials.verify_password(password, &user.password_hash) {
            tracing::warn!(%email, "login rejected: password mismatch");
            return Err(DomainError::Unauthenticated("invalid password".into()));
        }

        let token = self.credentials.issue_token(user.id)?;
        Ok((token, Identity::from(user)))
    }

    /// Resolves a bearer token into a live identity, secrets stripped.
    /// A token for a deleted user is as good as no token.
    pub async fn authenticate(&self, token: &str) -> Result<Identity> {
        if token.is_empty() {
            return Err(DomainError::Unauthenticated("access denied".into()));
        }
        let user_id = self.credentials.verify_token(token)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::InvalidToken)?;
        Ok(Identity::from(user))
    }

    /// True when the token is well-formed, correctly signed, and maps to a
    /// live user. Used to turn away already-logged-in callers.
    pub async fn holds_valid_session(&self, token: &str) -> bool {
        self.authenticate(token).await.is_ok()
    }

    /// Applies a self-service patch. A present raw password is re-hashed,
    /// a present email re-normalized; other fields go through verbatim.
    /// Returns the matched count (0 or 1).
    pub async fn update_account(&self, identity: &Identity, patch: UserPatch) -> Result<u64> {
        let update = UserUpdate {
            full_name: patch.full_name,
            email: patch.email.as_deref().map(normalize_email),
            password_hash: match patch.password.as_deref() {
                Some(raw) => Some(self.credentials.hash_password(raw)?),
                None => None,
            },
        };
        if update.is_empty() {
            return Ok(0);
        }
        self.users.update(identity.id, update).await
    }

    /// Deletes the account after re-verifying the password. Fails closed
    /// (count 0) on any mismatch.
    pub async fn delete_account(&self, identity: &Identity, password: &str) -> Result<u64> {
        let Some(user) = self.users.find_by_id(identity.id).await? else {
            return Ok(0);
        };
        if !self.credentials.verify_password(password, &user.password_hash) {
            return Ok(0);
        }
        let deleted = self.users.delete(user.id).await?;
        if deleted > 0 {
            tracing::info!(user = %user.id, "account deleted");
        }
        Ok(deleted)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }
}
