//! API 요청 DTO
//!
//! HTTP 경계에서 역직렬화되는 요청 본문 구조체들입니다.
//! `validator` 파생으로 형식 검증을 수행하며, 플로우 계층은 이와 별개로
//! 공백 정규화와 의미 검증을 다시 수행합니다.

use serde::Deserialize;
use validator::Validate;

/// 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// 로그인 아이디
    #[validate(length(min = 1, message = "로그인 아이디는 필수입니다"))]
    pub login_id: String,
    /// 비밀번호 (평문, TLS 구간에서만 전송)
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}

/// 토큰 갱신/로그아웃 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    /// 리프레시 토큰
    #[validate(length(min = 1, message = "리프레시 토큰은 필수입니다"))]
    pub refresh_token: String,
}

/// 회원가입 요청
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// 로그인 아이디 (4~20자)
    #[validate(length(min = 4, max = 20, message = "아이디는 4자 이상 20자 이하여야 합니다"))]
    pub login_id: String,
    /// 이메일 (사전에 인증 완료 상태여야 함)
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    /// 비밀번호 (8자 이상)
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
    /// 표시 이름
    #[validate(length(min = 1, max = 20, message = "닉네임은 1자 이상 20자 이하여야 합니다"))]
    pub nickname: String,
}

/// 이메일 인증 코드 발급 요청
#[derive(Debug, Deserialize, Validate)]
pub struct EmailVerificationRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
}

/// 이메일 인증 코드 확인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct EmailVerificationConfirmRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
    /// 6자리 인증 코드
    #[validate(length(equal = 6, message = "인증 코드는 6자리입니다"))]
    pub code: String,
}

/// 비밀번호 재설정 코드 발급 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(length(min = 1, message = "로그인 아이디는 필수입니다"))]
    pub login_id: String,
    /// 계정에 등록된 이메일과 일치해야 합니다
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: String,
}

/// 비밀번호 재설정 확정 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "로그인 아이디는 필수입니다"))]
    pub login_id: String,
    /// 메일로 전달된 6자리 재설정 코드
    #[validate(length(equal = 6, message = "재설정 코드는 6자리입니다"))]
    pub code: String,
    /// 새 비밀번호 (8자 이상)
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub new_password: String,
}

/// 프로필 수정 요청
///
/// 변경할 필드만 채워서 보냅니다. 최소 한 개의 변경 필드가 필요하며,
/// 어떤 변경이든 현재 비밀번호 확인을 요구합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// 현재 비밀번호 (본인 확인용)
    #[validate(length(min = 1, message = "현재 비밀번호는 필수입니다"))]
    pub current_password: String,
    /// 새 로그인 아이디
    pub new_login_id: Option<String>,
    /// 새 이메일 (사전에 인증 완료 상태여야 함)
    pub new_email: Option<String>,
    /// 새 표시 이름
    pub new_nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            login_id: "bob1".to_string(),
            email: "bob@x.com".to_string(),
            password: "Password1".to_string(),
            nickname: "Bob".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_id = SignupRequest {
            login_id: "bob".to_string(),
            ..valid_request()
        };
        assert!(short_id.validate().is_err());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_confirm_request_requires_six_digit_code() {
        let request = EmailVerificationConfirmRequest {
            email: "bob@x.com".to_string(),
            code: "12345".to_string(),
        };
        assert!(request.validate().is_err());

        let request = EmailVerificationConfirmRequest {
            email: "bob@x.com".to_string(),
            code: "012345".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    fn valid_request() -> SignupRequest {
        SignupRequest {
            login_id: "bob1".to_string(),
            email: "bob@x.com".to_string(),
            password: "Password1".to_string(),
            nickname: "Bob".to_string(),
        }
    }
}
