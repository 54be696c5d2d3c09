//! Password Reset HTTP Handlers
//!
//! 비밀번호 재설정 코드의 발급과 확정 엔드포인트입니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::state::AppState;
use crate::domain::dto::request::{PasswordResetConfirmRequest, PasswordResetRequest};
use crate::errors::AppError;

/// 비밀번호 재설정 코드 발급 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/password/request`
#[post("/password/request")]
pub async fn request_password_reset(
    state: web::Data<AppState>,
    payload: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .password_reset_service
        .request_reset(&payload.login_id, &payload.email)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "재설정 코드가 발송되었습니다"
    })))
}

/// 비밀번호 재설정 확정 핸들러
///
/// 성공 시 계정의 모든 세션이 해지되므로 재로그인이 필요합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/password/confirm`
#[post("/password/confirm")]
pub async fn confirm_password_reset(
    state: web::Data<AppState>,
    payload: web::Json<PasswordResetConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .password_reset_service
        .confirm_reset(&payload.login_id, &payload.code, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "비밀번호가 변경되었습니다. 다시 로그인해 주세요"
    })))
}
