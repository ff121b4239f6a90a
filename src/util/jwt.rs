use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

/// Role carried by tokens issued to the configured admin
pub const ADMIN_ROLE: &str = "admin";

/// JWT token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (the admin email)
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Token type (access or refresh)
    pub token_type: String,
    /// JWT ID, used to revoke a single token on logout
    pub jti: String,
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Clone)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
    #[error("Invalid token type: expected {expected}, got {actual}")]
    InvalidTokenType { expected: String, actual: String },
}

pub trait JwtTokenUtils {
    fn generate_access_token(&self, email: &str, role: &str) -> Result<String, JwtError>;
    fn generate_refresh_token(&self, email: &str, role: &str) -> Result<String, JwtError>;
    fn generate_token_pair(&self, email: &str, role: &str) -> Result<TokenPair, JwtError>;
    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
    fn check_role_permission(&self, user_role: &str, required_role: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    fn generate_token(&self, email: &str, role: &str, token_type: TokenType, expires_in_minutes: i64) -> Result<String, JwtError> {
        debug!("Generating {} token for {} with role: {}", token_type.as_str(), email, role);

        let now = Utc::now();
        let expiration = now + Duration::minutes(expires_in_minutes);

        let claims = Claims {
            sub: email.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iss: self.jwt_config.jwt_issuer.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            token_type: token_type.as_str().to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        encode(&header, &claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }

    pub fn validate_token(&self, token: &str, expected_token_type: Option<TokenType>) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.jwt_config.jwt_issuer.as_str()]);

        let claims = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => token_data.claims,
            Err(err) => {
                if matches!(err.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) {
                    warn!("Token has expired");
                    return Err(JwtError::TokenExpired);
                }
                error!("Failed to decode JWT token: {}", err);
                return Err(JwtError::DecodingFailed(err.to_string()));
            }
        };

        if let Some(expected_type) = expected_token_type {
            if claims.token_type != expected_type.as_str() {
                error!("Invalid token type: expected {}, got {}", expected_type.as_str(), claims.token_type);
                return Err(JwtError::InvalidTokenType {
                    expected: expected_type.as_str().to_string(),
                    actual: claims.token_type.clone(),
                });
            }
        }

        debug!("Token validation successful for: {}", claims.sub);
        Ok(claims)
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_access_token(&self, email: &str, role: &str) -> Result<String, JwtError> {
        self.generate_token(email, role, TokenType::Access, self.jwt_config.access_token_expiration)
    }

    fn generate_refresh_token(&self, email: &str, role: &str) -> Result<String, JwtError> {
        self.generate_token(email, role, TokenType::Refresh, self.jwt_config.refresh_token_expiration)
    }

    fn generate_token_pair(&self, email: &str, role: &str) -> Result<TokenPair, JwtError> {
        let access_token = self.generate_access_token(email, role)?;
        let refresh_token = self.generate_refresh_token(email, role)?;

        info!("Generated token pair for: {}", email);
        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.jwt_config.access_token_expiration * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token, Some(TokenType::Access))
    }

    fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token, Some(TokenType::Refresh))
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            warn!("Invalid authorization header format");
            return Err(JwtError::InvalidToken);
        };
        let token = token.trim();
        if token.is_empty() {
            warn!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }
        Ok(token.to_string())
    }

    fn check_role_permission(&self, user_role: &str, required_role: &str) -> bool {
        user_role == ADMIN_ROLE || user_role == required_role
    }
}
