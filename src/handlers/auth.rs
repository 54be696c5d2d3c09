//! Authentication HTTP Handlers
//!
//! 로그인, 토큰 갱신, 로그아웃 엔드포인트를 처리하는 핸들러 함수들입니다.
//! JWT 토큰 기반의 상태 없는 인증을 구현하며, 리프레시 토큰의 "현재 값"만
//! 휘발성 저장소에 유지됩니다.

use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::state::AppState;
use crate::domain::dto::request::{LoginRequest, RefreshTokenRequest};
use crate::domain::dto::response::TokenResponse;
use crate::errors::{AppError, AppResult};

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = state
        .auth_service
        .login(&payload.login_id, &payload.password)
        .await?;

    log::info!("로그인 성공: {}", payload.login_id);
    Ok(HttpResponse::Ok().json(TokenResponse::of(pair)))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰은 쿠키 또는 요청 본문으로 제시할 수 있습니다.
/// 성공한 갱신은 제시된 토큰을 무효화하고 새 쌍을 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = extract_refresh_token(&req, body.as_deref())?;

    let pair = state.auth_service.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::of(pair)))
}

/// 로그아웃 핸들러
///
/// 계정의 리프레시 토큰 슬롯을 해지합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = extract_refresh_token(&req, body.as_deref())?;

    state.auth_service.logout(&refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// HTTP 요청에서 리프레시 토큰 추출
///
/// 쿠키(`refresh_token`)를 먼저 확인하고, 없으면 요청 본문을 확인합니다.
fn extract_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> AppResult<String> {
    if let Some(cookie_header) = req.headers().get("Cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie_pair in cookie_str.split(';') {
                if let Some((name, value)) = cookie_pair.trim().split_once('=') {
                    if name.trim() == "refresh_token" && !value.trim().is_empty() {
                        return Ok(value.trim().to_string());
                    }
                }
            }
        }
    }

    if let Some(body) = body {
        if !body.refresh_token.is_empty() {
            return Ok(body.refresh_token.clone());
        }
    }

    Err(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{test, App};
    use serde_json::json;

    use crate::caching::InMemoryStore;
    use crate::config::JwtConfig;
    use crate::repositories::users::user_repo::UserRepository;
    use crate::services::auth::password_hasher::BcryptHasher;
    use crate::services::auth::test_support::{hashed_user, InMemoryUserRepository, RecordingMailer};
    use crate::services::auth::{
        AuthService, EmailVerificationService, PasswordResetService, TokenService, TokenStore,
    };
    use crate::services::users::UserService;

    async fn test_state() -> web::Data<AppState> {
        let users = Arc::new(InMemoryUserRepository::new());
        users
            .insert(hashed_user("bob", "bob@x.com", "Password1"))
            .await
            .unwrap();

        let token_service = Arc::new(TokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_expiration_secs: 3600,
            refresh_expiration_secs: 86400,
        }));
        let token_store = Arc::new(TokenStore::new(Arc::new(InMemoryStore::new())));
        let hasher = Arc::new(BcryptHasher::fast());
        let mailer = Arc::new(RecordingMailer::new());

        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            hasher.clone(),
            token_service.clone(),
            token_store.clone(),
        ));
        let email_verification_service = Arc::new(EmailVerificationService::new(
            token_store.clone(),
            mailer.clone(),
        ));
        let password_reset_service = Arc::new(PasswordResetService::new(
            users.clone(),
            token_store.clone(),
            hasher.clone(),
            mailer,
        ));
        let user_service = Arc::new(UserService::new(
            users,
            hasher,
            email_verification_service.clone(),
            token_store,
        ));

        web::Data::new(AppState {
            token_service,
            auth_service,
            email_verification_service,
            password_reset_service,
            user_service,
        })
    }

    #[actix_web::test]
    async fn test_login_endpoint_returns_token_pair() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1/auth").service(login).service(refresh)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "login_id": "bob", "password": "Password1" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(body["access_token"].as_str().is_some());
        assert!(body["refresh_token"].as_str().is_some());
        assert_eq!(body["token_type"], "Bearer");
    }

    #[actix_web::test]
    async fn test_login_endpoint_rejects_bad_credentials() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1/auth").service(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "login_id": "bob", "password": "WrongPass1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_refresh_endpoint_rotates_token() {
        let state = test_state().await;
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1/auth").service(login).service(refresh)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "login_id": "bob", "password": "Password1" }))
            .to_request();
        let login_body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let r1 = login_body["refresh_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": r1 }))
            .to_request();
        let refresh_body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_ne!(refresh_body["refresh_token"].as_str().unwrap(), r1);

        // 한 번 쓴 리프레시 토큰의 재사용은 401
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": r1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
