//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 코어의 모든 실패를 타입으로 표현하는 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 설계 원칙
//!
//! - **도메인 에러**: 종류마다 고정된 메시지를 갖는 단위 배리언트.
//!   보안상 일부 에러는 의도적으로 뭉뚱그려져 있습니다
//!   (예: 존재하지 않는 아이디와 잘못된 비밀번호는 모두 `InvalidCredentials`).
//!   이 뭉뚱그림은 계정 존재 여부를 노출하지 않기 위한 것이므로
//!   더 구체적인 에러로 세분화해서는 안 됩니다.
//! - **인프라 에러**: 저장소 연결 실패, 시간 초과 등 복구 관점이 다른
//!   실패는 상세 문자열을 갖는 별도 배리언트로 분리합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AppResult};
//!
//! async fn login(login_id: &str) -> AppResult<User> {
//!     user_repo.find_by_login_id(login_id).await?
//!         .ok_or(AppError::InvalidCredentials)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 도메인 에러는 고정 메시지, 인프라 에러는 상세 문자열을 갖습니다.
/// `ResponseError` 구현을 통해 HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 로그인 실패 (401 Unauthorized)
    ///
    /// 존재하지 않는 아이디와 잘못된 비밀번호를 구분하지 않습니다.
    #[error("아이디 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    /// 토큰이 없거나 위조되었거나 저장된 값과 일치하지 않음 (401 Unauthorized)
    #[error("인증이 필요합니다")]
    Unauthorized,

    /// 토큰의 형식은 올바르지만 만료됨 (401 Unauthorized)
    #[error("세션이 만료되었습니다")]
    SessionExpired,

    /// 사용자 없음 (404 Not Found)
    #[error("사용자를 찾을 수 없습니다")]
    UserNotFound,

    /// 필수 입력값 누락 또는 불일치 (400 Bad Request)
    #[error("잘못된 입력값입니다")]
    InvalidInput,

    /// 이메일 인증 코드 불일치/부재 (400 Bad Request)
    ///
    /// "코드가 없음"과 "코드가 틀림"을 구분하지 않습니다.
    #[error("이메일 인증 코드가 유효하지 않거나 만료되었습니다")]
    InvalidVerificationCode,

    /// 이메일 인증이 선행되지 않음 (400 Bad Request)
    #[error("이메일 인증이 필요합니다")]
    EmailVerificationRequired,

    /// 비밀번호 재설정 코드 불일치/부재 (400 Bad Request)
    ///
    /// 존재하지 않는 계정도 이 에러로 뭉뚱그려집니다.
    #[error("비밀번호 재설정 코드가 유효하지 않거나 만료되었습니다")]
    InvalidResetCode,

    /// 새 비밀번호가 기존 비밀번호와 동일 (400 Bad Request)
    #[error("기존 비밀번호와 동일한 비밀번호로는 변경할 수 없습니다")]
    SameAsOldPassword,

    /// 이미 사용 중인 로그인 아이디 (409 Conflict)
    #[error("이미 사용 중인 아이디입니다")]
    DuplicateLoginId,

    /// 이미 사용 중인 이메일 (409 Conflict)
    #[error("이미 사용 중인 이메일입니다")]
    DuplicateEmail,

    /// 현재 비밀번호 불일치 (400 Bad Request)
    #[error("비밀번호가 올바르지 않습니다")]
    InvalidPassword,

    /// 요청 DTO 검증 실패 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 휘발성 저장소 관련 에러 (500 Internal Server Error)
    #[error("Store error: {0}")]
    StoreError(String),

    /// 저장소/데이터베이스 호출 시간 초과 (503 Service Unavailable)
    ///
    /// "키 없음"과 구분되는 일시적 장애입니다.
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트 응답용 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "A003",
            AppError::Unauthorized => "A001",
            AppError::SessionExpired => "A004",
            AppError::UserNotFound => "U001",
            AppError::InvalidInput | AppError::ValidationError(_) => "C002",
            AppError::InvalidVerificationCode => "A007",
            AppError::EmailVerificationRequired => "A006",
            AppError::InvalidResetCode => "A005",
            AppError::SameAsOldPassword => "A008",
            AppError::DuplicateLoginId => "U003",
            AppError::DuplicateEmail => "U002",
            AppError::InvalidPassword => "U004",
            AppError::TimeoutError(_) => "E503",
            AppError::DatabaseError(_)
            | AppError::StoreError(_)
            | AppError::InternalError(_) => "E500",
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 종류를 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::InvalidCredentials
            | AppError::Unauthorized
            | AppError::SessionExpired => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateLoginId | AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidInput
            | AppError::ValidationError(_)
            | AppError::InvalidVerificationCode
            | AppError::EmailVerificationRequired
            | AppError::InvalidResetCode
            | AppError::SameAsOldPassword
            | AppError::InvalidPassword => StatusCode::BAD_REQUEST,
            AppError::TimeoutError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "code": self.code(),
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_invalid_credentials_response() {
        let error = AppError::InvalidCredentials;
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_session_expired_response() {
        let error = AppError::SessionExpired;
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_user_not_found_response() {
        let error = AppError::UserNotFound;
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_login_id_response() {
        let error = AppError::DuplicateLoginId;
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_domain_errors_are_bad_request() {
        for error in [
            AppError::InvalidInput,
            AppError::InvalidVerificationCode,
            AppError::EmailVerificationRequired,
            AppError::InvalidResetCode,
            AppError::SameAsOldPassword,
            AppError::InvalidPassword,
        ] {
            assert_eq!(
                error.error_response().status(),
                actix_web::http::StatusCode::BAD_REQUEST,
                "{:?}",
                error
            );
        }
    }

    #[test]
    fn test_timeout_is_service_unavailable() {
        let error = AppError::TimeoutError("redis".to_string());
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_infrastructure_error_response() {
        let error = AppError::StoreError("connection refused".to_string());
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes_match_kinds() {
        assert_eq!(AppError::InvalidCredentials.code(), "A003");
        assert_eq!(AppError::SessionExpired.code(), "A004");
        assert_eq!(AppError::InvalidResetCode.code(), "A005");
        assert_eq!(AppError::EmailVerificationRequired.code(), "A006");
        assert_eq!(AppError::InvalidVerificationCode.code(), "A007");
        assert_eq!(AppError::SameAsOldPassword.code(), "A008");
    }
}
