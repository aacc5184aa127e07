//! Bearer-token extraction and JWT validation.
//!
//! Tokens are HS256-signed with a shared secret. Authentication runs inside
//! the upload handlers (not middleware) because authorization is a stage of
//! the ingestion pipeline: it must happen after the request is size-bounded
//! and before anything touches disk.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reelvault_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // user_id
    pub iat: i64,  // issued at timestamp
    pub exp: i64,  // expiration timestamp
}

/// Pull the bearer token out of the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    if token.trim().is_empty() {
        return Err(AppError::Unauthorized("Empty bearer token".to_string()));
    }

    Ok(token.to_string())
}

/// JWT service with HS256 signing and strict validation.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: String, expiry_hours: i64) -> Self {
        Self {
            secret,
            expiry_hours,
        }
    }

    /// Issue a token for a user.
    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return the authenticated user id.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Invalid token signature".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid or expired token: {}", e)),
            }
        })?;

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn bearer_token_roundtrip() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_roundtrip_returns_subject() {
        let service = JwtService::new(SECRET.to_string(), 24);
        let user_id = Uuid::new_v4();
        let token = service.create_token(user_id).expect("sign");
        assert_eq!(service.validate_token(&token).unwrap(), user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(SECRET.to_string(), -1);
        let token = service.create_token(Uuid::new_v4()).expect("sign");
        let err = JwtService::new(SECRET.to_string(), 24)
            .validate_token(&token)
            .unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert!(msg.contains("expired")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = JwtService::new(SECRET.to_string(), 24);
        let token = service.create_token(Uuid::new_v4()).expect("sign");

        let other = JwtService::new("another-secret-another-secret-xx".to_string(), 24);
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::new(SECRET.to_string(), 24);
        assert!(matches!(
            service.validate_token("not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
