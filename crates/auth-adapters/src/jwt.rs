//! HS256 bearer tokens carrying a single user-id claim.

use chrono::Utc;
use domains::{CredentialService, DomainError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    /// Seconds since the epoch. Always finite; "permanent" sessions are a
    /// configuration choice, not a default.
    exp: i64,
    iat: i64,
}

/// [`CredentialService`] over Argon2id hashes and HS256 tokens.
pub struct JwtCredentials {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl JwtCredentials {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// The configured session lifetime, also used for the cookie Max-Age.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl CredentialService for JwtCredentials {
    fn hash_password(&self, raw: &str) -> Result<String> {
        crate::hash_password(raw)
    }

    fn verify_password(&self, raw: &str, hash: &str) -> bool {
        crate::verify_password(raw, hash)
    }

    fn issue_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.ttl_secs as i64,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| DomainError::Store(format!("token signing failed: {err}")))
    }

    fn verify_token(&self, token: &str) -> Result<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| DomainError::InvalidToken)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| DomainError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: u64 = 60 * 60;

    #[test]
    fn token_round_trip_recovers_the_user_id() {
        let creds = JwtCredentials::new("test-secret", TTL);
        let user_id = Uuid::now_v7();
        let token = creds.issue_token(user_id).unwrap();
        assert_eq!(creds.verify_token(&token).unwrap(), user_id);
    }

    #[test]
    fn foreign_or_tampered_tokens_fail() {
        let creds = JwtCredentials::new("test-secret", TTL);
        let other = JwtCredentials::new("other-secret", TTL);
        let token = other.issue_token(Uuid::now_v7()).unwrap();
        assert!(matches!(
            creds.verify_token(&token).unwrap_err(),
            DomainError::InvalidToken
        ));
        assert!(matches!(
            creds.verify_token("garbage.token.here").unwrap_err(),
            DomainError::InvalidToken
        ));
    }

    #[test]
    fn expired_tokens_fail() {
        let creds = JwtCredentials::new("test-secret", TTL);
        // Hand-roll a token whose expiry is far past any validation leeway.
        let stale = Claims {
            sub: Uuid::now_v7().to_string(),
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(matches!(
            creds.verify_token(&token).unwrap_err(),
            DomainError::InvalidToken
        ));
    }

    #[test]
    fn claims_carry_only_the_user_id_subject() {
        let creds = JwtCredentials::new("test-secret", TTL);
        let token = creds.issue_token(Uuid::now_v7()).unwrap();
        // Three dot-separated segments, i.e. a compact JWS.
        assert_eq!(token.split('.').count(), 3);
    }
}
