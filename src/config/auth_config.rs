//! # 인증 설정 모듈
//!
//! JWT 토큰과 비밀번호 해싱 관련 설정을 관리합니다.
//! Spring Security의 `jwt.*` 프로퍼티와 유사한 역할을 수행하며,
//! 환경 변수에서 값을 읽어 시작 시점에 한 번 로드합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! export BCRYPT_COST="12"
//! ```

use std::env;

/// JSON Web Token (JWT) 관련 설정
///
/// 토큰 서명 비밀키와 액세스/리프레시 토큰의 만료 시간을 관리합니다.
/// 만료 시간은 내부적으로 초 단위로 저장되어 토큰 발급과
/// 리프레시 토큰 슬롯의 TTL 계산에 동일하게 사용됩니다.
///
/// ## 권장 설정값
///
/// - **개발**: 액세스 토큰 24시간, 리프레시 토큰 7일
/// - **프로덕션**: 액세스 토큰 15분~1시간, 리프레시 토큰 14~30일
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT 서명 비밀키 (HMAC-SHA256)
    pub secret: String,
    /// 액세스 토큰 만료 시간 (초)
    pub access_expiration_secs: i64,
    /// 리프레시 토큰 만료 시간 (초)
    pub refresh_expiration_secs: i64,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 로드합니다.
    ///
    /// ## 환경 변수
    ///
    /// - `JWT_SECRET`: 서명 비밀키. 미설정 시 개발용 기본값을 사용하며
    ///   경고 로그가 출력됩니다.
    /// - `JWT_EXPIRATION_HOURS`: 액세스 토큰 만료 (기본값: 24시간)
    /// - `JWT_REFRESH_EXPIRATION_DAYS`: 리프레시 토큰 만료 (기본값: 7일)
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "dev-only-jwt-secret".to_string()
        });

        let expiration_hours: i64 = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let refresh_expiration_days: i64 = env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        Self {
            secret,
            access_expiration_secs: expiration_hours * 3600,
            refresh_expiration_secs: refresh_expiration_days * 86400,
        }
    }
}

/// 비밀번호 해싱 설정
///
/// bcrypt cost factor를 관리합니다. 값이 클수록 해싱이 느려지고
/// 무차별 대입 공격에 강해집니다.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost factor (4~31)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 환경 변수에서 비밀번호 설정을 로드합니다.
    ///
    /// `BCRYPT_COST` 미설정 시 bcrypt 기본값(12)을 사용합니다.
    /// 테스트 환경에서는 4 정도로 낮춰 실행 시간을 줄일 수 있습니다.
    pub fn from_env() -> Self {
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        Self { bcrypt_cost }
    }
}
