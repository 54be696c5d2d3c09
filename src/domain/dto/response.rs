//! API 응답 DTO

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::users::user::User;
use crate::domain::models::token::TokenPair;

/// 토큰 발급 응답
///
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn of(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: "Bearer",
        }
    }
}

/// 회원가입 응답
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// 생성된 사용자 ID
    pub user_id: String,
}

/// 사용자 프로필 응답
///
/// 비밀번호 해시 등 민감 정보는 제외됩니다.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub login_id: String,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id_hex().unwrap_or_default(),
            login_id: user.login_id.clone(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
        }
    }
}

fn to_utc(datetime: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(datetime.timestamp_millis()).unwrap_or_default()
}
