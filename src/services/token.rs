use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult, AuthError};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Issues and verifies HMAC-signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
    leeway_seconds: u64,
}

impl TokenService {
    /// Build the service from config. The token lifetime must be positive
    /// and small enough that `now + lifetime` is a representable timestamp.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let minutes = config.access_token_expire_minutes;
        if minutes <= 0 {
            return Err(AppError::Config(format!(
                "access_token_expire_minutes must be positive, got {}",
                minutes
            )));
        }
        let lifetime = Duration::try_minutes(minutes)
            .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "access_token_expire_minutes is out of range: {}",
                    minutes
                ))
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm: config.algorithm.to_jsonwebtoken(),
            lifetime,
            leeway_seconds: config.leeway_seconds,
        })
    }

    pub fn issue(&self, subject: &str) -> AppResult<String> {
        self.issue_with_lifetime(subject, None)
    }

    /// Sign a token for `subject` that expires after `lifetime`, or after the
    /// configured default when none is given.
    pub fn issue_with_lifetime(&self, subject: &str, lifetime: Option<Duration>) -> AppResult<String> {
        let expires_at = Utc::now()
            .checked_add_signed(lifetime.unwrap_or(self.lifetime))
            .ok_or(AppError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
        };
        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?)
    }

    /// Check signature and expiry, returning the subject claim.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        data.claims.sub.ok_or(AuthError::MissingSubject)
    }
}
