//! Signed session tokens (HS256)

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// Claims carried by a session token. Every field is required; a token
/// missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String,
    pub first_name: String,
    pub last_name: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl JwtService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn issue(
        &self,
        user_id: i32,
        first_name: &str,
        last_name: &str,
    ) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds);
        let claims = SessionClaims {
            sub: user_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new("test-secret", 1200);
        let issued = service.issue(42, "Thomas", "Anderson").unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.first_name, "Thomas");
        assert_eq!(claims.last_name, "Anderson");
        assert_eq!(claims.exp - claims.iat, 1200);
        assert_eq!(claims.expires_at().unwrap().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtService::new("secret-a", 1200).issue(1, "A", "B").unwrap();
        let result = JwtService::new("secret-b", 1200).validate(&issued.token);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new("test-secret", -30);
        let issued = service.issue(7, "Kid", "Smith").unwrap();
        assert!(matches!(service.validate(&issued.token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_missing_claim_rejected() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            #[serde(rename = "firstName")]
            first_name: String,
            iat: i64,
            exp: i64,
            jti: String,
        }
        let now = Utc::now().timestamp();
        let partial = Partial {
            sub: "5".into(),
            first_name: "Trinity".into(),
            iat: now,
            exp: now + 600,
            jti: "x".into(),
        };
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let service = JwtService::new("test-secret", 1200);
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_claims_serialize_camel_case() {
        let service = JwtService::new("test-secret", 60);
        let issued = service.issue(3, "Niobe", "Lee").unwrap();
        let claims = service.validate(&issued.token).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["firstName"], "Niobe");
        assert_eq!(json["lastName"], "Lee");
    }
}
