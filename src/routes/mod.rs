//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증, 사용자 관련 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Route Groups
//!
//! ## 인증 (Public)
//! - `POST /api/v1/auth/login` - 로그인
//! - `POST /api/v1/auth/refresh` - 토큰 갱신
//! - `POST /api/v1/auth/logout` - 로그아웃
//! - `POST /api/v1/auth/email/request` - 이메일 인증 코드 발급
//! - `POST /api/v1/auth/email/confirm` - 이메일 인증 코드 확인
//! - `POST /api/v1/auth/password/request` - 비밀번호 재설정 코드 발급
//! - `POST /api/v1/auth/password/confirm` - 비밀번호 재설정 확정
//!
//! ## 사용자
//! - `POST /api/v1/users` - 회원가입 (Public)
//! - `GET /api/v1/me` - 내 프로필 조회 (Bearer 토큰)
//! - `PATCH /api/v1/me` - 내 프로필 수정 (Bearer 토큰)
//! - `DELETE /api/v1/me` - 계정 삭제 (Bearer 토큰)

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::email_verification::request_email_verification)
            .service(handlers::email_verification::confirm_email_verification)
            .service(handlers::password_reset::request_password_reset)
            .service(handlers::password_reset::confirm_password_reset),
    );
}

/// 사용자 관련 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(web::scope("/api/v1/users").service(handlers::users::signup));

    // Protected routes - 핸들러가 Bearer 토큰을 직접 검증한다
    cfg.service(
        web::scope("/api/v1/me")
            .service(handlers::users::get_my_profile)
            .service(handlers::users::update_my_profile)
            .service(handlers::users::delete_my_account),
    );
}

/// 헬스체크 엔드포인트
///
/// 로드밸런서와 모니터링 시스템이 사용합니다.
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "UP",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
