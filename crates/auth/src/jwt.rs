//! JWT token generation and validation.

use bson::oid::ObjectId;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, AuthResult, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_JWT_ISSUER};

/// JWT claims for Bookshelf access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID as a hex ObjectId.
    pub id: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// JWT ID.
    pub jti: String,
}

impl Claims {
    /// Creates claims for a user that expire `lifetime` from now.
    pub fn new(
        user_id: ObjectId,
        issuer: impl Into<String>,
        lifetime: TimeDelta,
    ) -> AuthResult<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(lifetime).ok_or_else(|| {
            AuthError::Configuration("token expiry is out of range".to_string())
        })?;

        Ok(Self {
            id: user_id.to_hex(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Returns the user ID.
    pub fn user_id(&self) -> AuthResult<ObjectId> {
        ObjectId::parse_str(&self.id).map_err(|_| AuthError::InvalidToken)
    }
}

/// Converts a lifetime in hours, rejecting values chrono cannot represent.
fn token_lifetime(hours: u64) -> AuthResult<TimeDelta> {
    i64::try_from(hours)
        .ok()
        .and_then(TimeDelta::try_hours)
        .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
        .ok_or_else(|| {
            AuthError::Configuration(format!("JWT expiration of {hours} hours is out of range"))
        })
}

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in hours.
    pub expiration_hours: u64,
    /// Token issuer.
    pub issuer: String,
}

impl JwtConfig {
    /// Creates a new JWT configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
        }
    }

    /// Sets the expiration time in hours.
    pub fn with_expiration_hours(mut self, hours: u64) -> Self {
        self.expiration_hours = hours;
        self
    }
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    lifetime: TimeDelta,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("issuer", &self.config.issuer)
            .field("expiration_hours", &self.config.expiration_hours)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Creates a new JWT manager.
    ///
    /// Fails if the secret is empty or the expiration is out of range.
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Configuration(
                "JWT secret must not be empty".to_string(),
            ));
        }
        let lifetime = token_lifetime(config.expiration_hours)?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            lifetime,
            encoding_key,
            decoding_key,
        })
    }

    /// Generates an access token carrying the user's ID.
    pub fn generate_token(&self, user_id: ObjectId) -> AuthResult<String> {
        let claims = Claims::new(user_id, &self.config.issuer, self.lifetime)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::JwtEncoding(e.to_string()))
    }

    /// Validates and decodes a token.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}
