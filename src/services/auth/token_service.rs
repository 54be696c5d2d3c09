//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{TokenClaims, TokenKind, TokenPair};
use crate::errors::{AppError, AppResult};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 무상태 토큰을 생성하고 검증합니다.
/// 토큰 자체는 어디에도 저장되지 않습니다. 유효성은 서명과 만료
/// 시간만으로 판정되며, 리프레시 토큰의 "현재 값" 관리는
/// `TokenStore`의 책임입니다.
///
/// ## 에러 구분
///
/// 검증 실패는 두 종류로 구분됩니다. 호출자는 이 구분에 의존합니다:
///
/// - `SessionExpired`: 형식과 서명은 올바르지만 만료된 토큰
/// - `Unauthorized`: 위조되었거나 형식이 잘못된 토큰
pub struct TokenService {
    secret: String,
    access_expiration_secs: i64,
    refresh_expiration_secs: i64,
}

impl TokenService {
    /// 새 토큰 서비스를 생성합니다.
    pub fn new(config: JwtConfig) -> Self {
        Self {
            secret: config.secret,
            access_expiration_secs: config.access_expiration_secs,
            refresh_expiration_secs: config.refresh_expiration_secs,
        }
    }

    /// 리프레시 토큰 슬롯의 TTL
    ///
    /// 리프레시 토큰 자체의 만료와 저장소 슬롯의 TTL은 항상 같은
    /// 값을 사용합니다.
    pub fn refresh_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_expiration_secs.max(0) as u64)
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `InternalError` - 토큰 인코딩 실패
    pub fn create_access_token(&self, user_id: &str, login_id: &str) -> AppResult<String> {
        self.create_token(user_id, login_id, TokenKind::Access, self.access_expiration_secs)
    }

    /// 사용자를 위한 리프레시 토큰 생성
    ///
    /// 액세스 토큰과 동일한 신원 정보를 담지만 `token_type` 클레임이
    /// 다르므로 두 토큰을 맞바꿔 쓸 수 없습니다.
    pub fn create_refresh_token(&self, user_id: &str, login_id: &str) -> AppResult<String> {
        self.create_token(user_id, login_id, TokenKind::Refresh, self.refresh_expiration_secs)
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Errors
    ///
    /// * `InternalError` - 사용자 ID 없음 또는 토큰 생성 실패
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let user_id = user
            .id_hex()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let access_token = self.create_access_token(&user_id, &user.login_id)?;
        let refresh_token = self.create_refresh_token(&user_id, &user.login_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_expiration_secs,
        })
    }

    fn create_token(
        &self,
        user_id: &str,
        login_id: &str,
        kind: TokenKind,
        expiration_secs: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiration_secs);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            login_id: login_id.to_string(),
            token_type: kind,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `SessionExpired` - 형식은 올바르지만 만료된 토큰
    /// * `Unauthorized` - 위조되었거나 형식이 잘못된 토큰
    pub fn validate_token(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::SessionExpired,
                _ => AppError::Unauthorized,
            })
    }

    /// 액세스 토큰 검증
    ///
    /// 리프레시 토큰을 제시하면 서명이 유효해도 `Unauthorized`입니다.
    pub fn validate_access_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenKind::Access {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    /// 리프레시 토큰 검증
    ///
    /// 액세스 토큰을 제시하면 서명이 유효해도 `Unauthorized`입니다.
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenKind::Refresh {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서
    /// 토큰 부분만을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::token::TokenKind;

    fn service() -> TokenService {
        TokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_expiration_secs: 3600,
            refresh_expiration_secs: 7 * 86400,
        })
    }

    /// 이미 만료된 토큰을 만들기 위한 서비스.
    /// 기본 검증 leeway(60초)를 넘기도록 충분히 과거로 설정한다.
    fn expired_service() -> TokenService {
        TokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_expiration_secs: -7200,
            refresh_expiration_secs: -7200,
        })
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let token = service.create_access_token("user-1", "bob").unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.login_id, "bob");
        assert_eq!(claims.token_type, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = service();
        let access = service.create_access_token("user-1", "bob").unwrap();
        let refresh = service.create_refresh_token("user-1", "bob").unwrap();

        assert!(matches!(
            service.validate_refresh_token(&access),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            service.validate_access_token(&refresh),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_is_session_expired() {
        let token = expired_service()
            .create_refresh_token("user-1", "bob")
            .unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(AppError::SessionExpired)
        ));
    }

    #[test]
    fn test_malformed_token_is_unauthorized() {
        assert!(matches!(
            service().validate_token("garbage"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let other = TokenService::new(JwtConfig {
            secret: "other-secret".to_string(),
            access_expiration_secs: 3600,
            refresh_expiration_secs: 86400,
        });
        let token = other.create_refresh_token("user-1", "bob").unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(service.extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert!(service.extract_bearer_token("Basic abc").is_err());
    }
}
