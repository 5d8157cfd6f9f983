use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use atrium_auth::{JwtClaims, validate_claims};
use atrium_core::UserId;

use crate::context::CallerContext;

/// HS256 key pair derived from the shared secret.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Wire-level token claims (seconds since epoch, JWT registered names).
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthState {
    pub keys: Arc<JwtKeys>,
}

impl AuthState {
    /// Sign a token for `user_id`, valid for seven days.
    pub fn sign(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, StatusCode> {
        let claims = TokenClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(7)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Verify signature, then validate the claim window deterministically.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, StatusCode> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // the claim window is checked via validate_claims below
        validation.validate_exp = false;

        let decoded = jsonwebtoken::decode::<TokenClaims>(token, &self.keys.decoding, &validation)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let claims = JwtClaims {
            sub: decoded.claims.sub,
            issued_at: DateTime::from_timestamp(decoded.claims.iat, 0)
                .ok_or(StatusCode::UNAUTHORIZED)?,
            expires_at: DateTime::from_timestamp(decoded.claims.exp, 0)
                .ok_or(StatusCode::UNAUTHORIZED)?,
        };
        validate_claims(&claims, now).map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(claims)
    }
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;
    let claims = state.verify(token, Utc::now())?;

    req.extensions_mut().insert(CallerContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AuthState {
        AuthState {
            keys: Arc::new(JwtKeys::from_secret(b"test-secret")),
        }
    }

    #[test]
    fn sign_verify_roundtrip() {
        let state = state();
        let user = UserId::new();
        let now = Utc::now();

        let token = state.sign(user, now).unwrap();
        let claims = state.verify(&token, now).unwrap();
        assert_eq!(claims.sub, user);
    }

    #[test]
    fn expired_token_rejected() {
        let state = state();
        let issued = Utc::now() - chrono::Duration::days(30);

        let token = state.sign(UserId::new(), issued).unwrap();
        assert_eq!(
            state.verify(&token, Utc::now()).unwrap_err(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn tampered_token_rejected() {
        let state = state();
        let token = state.sign(UserId::new(), Utc::now()).unwrap();
        let other = AuthState {
            keys: Arc::new(JwtKeys::from_secret(b"other-secret")),
        };
        assert!(other.verify(&token, Utc::now()).is_err());
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc.def.ghi".parse().unwrap(),
        );
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");

        headers.insert(axum::http::header::AUTHORIZATION, "Basic xyz".parse().unwrap());
        assert!(extract_bearer(&headers).is_err());
    }
}
