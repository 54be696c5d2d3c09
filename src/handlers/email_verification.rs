//! Email Verification HTTP Handlers
//!
//! 이메일 인증 코드의 발급과 확인 엔드포인트입니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::state::AppState;
use crate::domain::dto::request::{EmailVerificationConfirmRequest, EmailVerificationRequest};
use crate::errors::AppError;

/// 이메일 인증 코드 발급 핸들러
///
/// 재요청 시 이전 코드는 덮어써집니다.
///
/// # Endpoint
/// `POST /api/v1/auth/email/request`
#[post("/email/request")]
pub async fn request_email_verification(
    state: web::Data<AppState>,
    payload: web::Json<EmailVerificationRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .email_verification_service
        .request_verification(&payload.email)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "인증 코드가 발송되었습니다"
    })))
}

/// 이메일 인증 코드 확인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/email/confirm`
#[post("/email/confirm")]
pub async fn confirm_email_verification(
    state: web::Data<AppState>,
    payload: web::Json<EmailVerificationConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state
        .email_verification_service
        .confirm_verification(&payload.email, &payload.code)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "이메일 인증이 완료되었습니다"
    })))
}
