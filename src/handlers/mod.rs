//! HTTP 핸들러 모듈
//!
//! 요청 역직렬화, DTO 검증, 서비스 호출, 응답 직렬화를 담당합니다.
//! 비즈니스 규칙은 서비스 계층에 있으며 핸들러는 얇게 유지합니다.

pub mod auth;
pub mod email_verification;
pub mod password_reset;
pub mod users;

use actix_web::HttpRequest;

use crate::errors::{AppError, AppResult};
use crate::services::auth::TokenService;

/// Authorization 헤더의 액세스 토큰을 검증하고 로그인 아이디를 돌려줍니다.
///
/// 보호된 엔드포인트(`/api/v1/me`)가 사용합니다.
/// 리프레시 토큰을 제시하면 서명이 유효해도 거부됩니다.
pub(crate) fn authenticated_login_id(
    req: &HttpRequest,
    tokens: &TokenService,
) -> AppResult<String> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = tokens.extract_bearer_token(auth_header)?;
    let claims = tokens.validate_access_token(token)?;
    Ok(claims.login_id)
}
