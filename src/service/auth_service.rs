use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::AdminUserConfig;
use crate::dto::auth_dto::{LoginResponse, LogoutResponse, SessionResponse};
use crate::util::error::ServiceError;
use crate::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl, TokenPair, ADMIN_ROLE};
use crate::util::password::{PasswordError, PasswordUtils, PasswordUtilsImpl};

pub const LOGIN_REDIRECT: &str = "/admin/login";

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError>;
    async fn refresh(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;
    async fn logout(&self, claims: &Claims) -> LogoutResponse;
    /// Validates an access token and checks it has not been revoked.
    async fn authorize(&self, token: &str) -> Result<Claims, ServiceError>;
    async fn session(&self, auth_header: Option<&str>) -> SessionResponse;
}

/// Single-admin authentication. The configured password only lives in
/// memory as an argon2 hash; logged-out tokens are remembered until they
/// would have expired anyway.
pub struct AuthServiceImpl {
    admin_email: String,
    admin_password_hash: String,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    revoked: RwLock<HashMap<String, i64>>,
}

impl AuthServiceImpl {
    pub fn new(admin: &AdminUserConfig, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Result<Self, PasswordError> {
        Ok(AuthServiceImpl {
            admin_email: admin.email.clone(),
            admin_password_hash: PasswordUtilsImpl::hash_password(&admin.password)?,
            jwt_utils,
            revoked: RwLock::new(HashMap::new()),
        })
    }

    async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains_key(jti)
    }

    fn issue(&self) -> Result<TokenPair, ServiceError> {
        self.jwt_utils
            .generate_token_pair(&self.admin_email, ADMIN_ROLE)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError> {
        info!("Admin login attempt");
        let password_ok = PasswordUtilsImpl::verify_password(&password, &self.admin_password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if email != self.admin_email || !password_ok {
            warn!("Invalid admin credentials");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let tokens = self.issue()?;
        info!("Admin logged in");
        Ok(LoginResponse { success: true, email, tokens })
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
        let claims = self.jwt_utils.validate_refresh_token(&refresh_token).map_err(|e| {
            warn!("Rejected refresh token: {}", e);
            ServiceError::Unauthorized("Invalid refresh token".to_string())
        })?;
        if claims.email != self.admin_email || self.is_revoked(&claims.jti).await {
            return Err(ServiceError::Unauthorized("Invalid refresh token".to_string()));
        }
        self.issue()
    }

    #[instrument(skip(self, claims), fields(email = %claims.email))]
    async fn logout(&self, claims: &Claims) -> LogoutResponse {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti.clone(), claims.exp);
        info!(revoked = revoked.len(), "Admin logged out");
        LogoutResponse { success: true, redirect: LOGIN_REDIRECT.to_string() }
    }

    async fn authorize(&self, token: &str) -> Result<Claims, ServiceError> {
        let claims = self
            .jwt_utils
            .validate_access_token(token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))?;
        if self.is_revoked(&claims.jti).await {
            warn!("Revoked token presented");
            return Err(ServiceError::Unauthorized("Token has been revoked".to_string()));
        }
        Ok(claims)
    }

    async fn session(&self, auth_header: Option<&str>) -> SessionResponse {
        let token = auth_header.and_then(|h| self.jwt_utils.extract_token_from_header(h).ok());
        let claims = match token {
            Some(token) => self.authorize(&token).await.ok(),
            None => None,
        };
        match claims {
            Some(claims) if claims.role == ADMIN_ROLE => SessionResponse { authenticated: true, email: Some(claims.email) },
            _ => SessionResponse { authenticated: false, email: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;

    fn service() -> AuthServiceImpl {
        let admin = AdminUserConfig { email: "admin@hotel.com".to_string(), password: "letmein-please".to_string() };
        AuthServiceImpl::new(&admin, Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()))).unwrap()
    }

    #[tokio::test]
    async fn test_login_requires_both_fields_to_match() {
        let service = service();
        assert!(service.login("admin@hotel.com".into(), "letmein-please".into()).await.is_ok());
        assert!(matches!(
            service.login("admin@hotel.com".into(), "nope".into()).await,
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(matches!(
            service.login("other@hotel.com".into(), "letmein-please".into()).await,
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_revokes_the_access_token() {
        let service = service();
        let login = service.login("admin@hotel.com".into(), "letmein-please".into()).await.unwrap();
        let claims = service.authorize(&login.tokens.access_token).await.unwrap();
        let bye = service.logout(&claims).await;
        assert_eq!(bye.redirect, "/admin/login");
        assert!(service.authorize(&login.tokens.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_session_check_never_fails() {
        let service = service();
        assert!(!service.session(None).await.authenticated);
        assert!(!service.session(Some("Bearer garbage")).await.authenticated);
        let login = service.login("admin@hotel.com".into(), "letmein-please".into()).await.unwrap();
        let header = format!("Bearer {}", login.tokens.access_token);
        let session = service.session(Some(&header)).await;
        assert!(session.authenticated);
        assert_eq!(session.email.as_deref(), Some("admin@hotel.com"));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair() {
        let service = service();
        let login = service.login("admin@hotel.com".into(), "letmein-please".into()).await.unwrap();
        let pair = service.refresh(login.tokens.refresh_token).await.unwrap();
        assert!(service.authorize(&pair.access_token).await.is_ok());
        assert!(service.refresh(pair.access_token).await.is_err());
    }
}
