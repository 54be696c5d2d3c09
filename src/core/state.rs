//! 애플리케이션 상태 (명시적 의존성 주입 컨테이너)
//!
//! 모든 서비스는 `main`에서 명시적으로 생성되어 이 구조체에 담기고,
//! `web::Data`를 통해 핸들러에 주입됩니다. 전역 싱글톤이나 서비스
//! 로케이터는 사용하지 않습니다. 의존성 그래프가 생성 코드에 그대로
//! 드러나고, 테스트에서는 인메모리 구현으로 자유롭게 조립할 수 있습니다.

use std::sync::Arc;

use crate::services::auth::{
    AuthService, EmailVerificationService, PasswordResetService, TokenService,
};
use crate::services::users::UserService;

/// 핸들러에 주입되는 서비스 묶음
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub email_verification_service: Arc<EmailVerificationService>,
    pub password_reset_service: Arc<PasswordResetService>,
    pub user_service: Arc<UserService>,
}
