use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

/// Verified assertions carried by a bearer token. Attached to the request as
/// an extension once validated, so handlers read them explicitly instead of
/// from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(cfg: &JwtConfig, subject: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iss: cfg.issuer.clone(),
            // Audience mirrors the issuer for this single-service deployment.
            aud: cfg.issuer.clone(),
            exp: (now + Duration::seconds(cfg.ttl_secs)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn generate_jwt(cfg: &JwtConfig, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
}

/// Decode and verify a token: HS256 signature, expiry, issuer and audience.
pub fn validate_jwt(cfg: &JwtConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&cfg.issuer]);
    validation.set_audience(&[&cfg.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "todolist".to_string(),
            ttl_secs: 3600,
            auth_enabled: true,
        }
    }

    #[test]
    fn issued_token_validates() {
        let cfg = test_config();
        let claims = Claims::new(&cfg, "alice");
        let token = generate_jwt(&cfg, &claims).expect("encode");

        let decoded = validate_jwt(&cfg, &token).expect("decode");
        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.iss, "todolist");
        assert_eq!(decoded.aud, "todolist");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let cfg = test_config();
        let claims = Claims::new(&cfg, "alice");
        let token = generate_jwt(&cfg, &claims).expect("encode");

        let other = JwtConfig {
            secret: "different-secret".to_string(),
            ..test_config()
        };
        assert!(validate_jwt(&other, &token).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let cfg = test_config();
        let claims = Claims::new(&cfg, "alice");
        let token = generate_jwt(&cfg, &claims).expect("encode");

        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_jwt(&other, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = test_config();
        let mut claims = Claims::new(&cfg, "alice");
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = generate_jwt(&cfg, &claims).expect("encode");

        assert!(validate_jwt(&cfg, &token).is_err());
    }
}
