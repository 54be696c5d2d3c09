//! # User Management HTTP Handlers
//!
//! 회원가입과 본인 프로필 관리 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 인증 |
//! |--------|------|------|------|
//! | `POST` | `/api/v1/users` | 회원가입 | 불필요 (이메일 인증 선행) |
//! | `GET` | `/api/v1/me` | 내 프로필 조회 | Bearer 액세스 토큰 |
//! | `PATCH` | `/api/v1/me` | 내 프로필 수정 | Bearer 액세스 토큰 |
//! | `DELETE` | `/api/v1/me` | 계정 삭제 | Bearer 액세스 토큰 |

use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::state::AppState;
use crate::domain::dto::request::{SignupRequest, UpdateProfileRequest};
use crate::domain::dto::response::{SignupResponse, UserResponse};
use crate::errors::AppError;

use super::authenticated_login_id;

/// 회원가입 핸들러
///
/// 가입 전 `POST /api/v1/auth/email/request` → `confirm`으로
/// 이메일 인증이 완료되어 있어야 합니다.
///
/// # Endpoint
/// `POST /api/v1/users`
#[post("")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state.user_service.signup(payload.into_inner()).await?;

    log::info!("회원가입 완료: {}", user.login_id);
    Ok(HttpResponse::Created().json(SignupResponse {
        user_id: user.id_hex().unwrap_or_default(),
    }))
}

/// 내 프로필 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn get_my_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let login_id = authenticated_login_id(&req, &state.token_service)?;

    let user = state.user_service.get_profile(&login_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from_user(&user)))
}

/// 내 프로필 수정 핸들러
///
/// # Endpoint
/// `PATCH /api/v1/me`
#[patch("")]
pub async fn update_my_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let login_id = authenticated_login_id(&req, &state.token_service)?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = state
        .user_service
        .update_profile(&login_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from_user(&user)))
}

/// 계정 삭제 핸들러
///
/// # Endpoint
/// `DELETE /api/v1/me`
#[delete("")]
pub async fn delete_my_account(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let login_id = authenticated_login_id(&req, &state.token_service)?;

    state.user_service.delete_account(&login_id).await?;

    log::info!("계정 삭제 완료: {}", login_id);
    Ok(HttpResponse::NoContent().finish())
}
