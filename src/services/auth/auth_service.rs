//! 인증 오케스트레이션 서비스 구현
//!
//! 로그인, 리프레시 토큰 회전, 로그아웃을 담당합니다.
//! 토큰 서명/검증은 `TokenService`, 리프레시 토큰 슬롯 관리는
//! `TokenStore`, 영속 사용자 조회는 `UserRepository`에 위임합니다.
//!
//! ## 리프레시 토큰 슬롯 상태 전이
//!
//! ```text
//! absent ──(로그인/갱신 저장)──▶ active
//! active ──(갱신 회전)─────────▶ active'   (새 값, 이전 토큰 무효)
//! active ──(로그아웃/재설정/계정 삭제/아이디 변경)──▶ absent
//! active ──(TTL 경과)──────────▶ absent
//! ```
//!
//! "해지됨"이라는 별도 상태는 없습니다. 해지는 곧 삭제입니다.

use std::sync::Arc;

use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserRepository;

use super::code;
use super::password_hasher::PasswordHasher;
use super::token_service::TokenService;
use super::token_store::TokenStore;

/// 로그인/갱신/로그아웃 오케스트레이션 서비스
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
    token_store: Arc<TokenStore>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
        token_store: Arc<TokenStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            token_store,
        }
    }

    /// 로그인
    ///
    /// 성공 시 토큰 쌍을 발급하고 계정의 리프레시 토큰 슬롯을
    /// 새 토큰으로 덮어씁니다. 이전 세션의 리프레시 토큰은 그 즉시
    /// 무효화됩니다 (계정당 살아있는 리프레시 토큰은 최대 1개).
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - 아이디가 없거나 비밀번호가 틀린 경우.
    ///   두 경우는 구분되지 않습니다.
    pub async fn login(&self, login_id: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_login_id(login_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.matches(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let pair = self.tokens.generate_token_pair(&user)?;

        self.token_store
            .store_refresh_token(&user.login_id, &pair.refresh_token, self.tokens.refresh_ttl())
            .await?;

        Ok(pair)
    }

    /// 리프레시 토큰으로 새 토큰 쌍 발급
    ///
    /// 성공한 갱신은 방금 제시된 토큰을 무효화합니다. 리프레시 토큰은
    /// 한 번 쓰고 회전되는 일회용 자격 증명입니다. 회전이 끝난 이전
    /// 토큰을 다시 제시하면 `Unauthorized`로 거부됩니다 (재사용 탐지).
    ///
    /// 저장된 값 비교와 새 값 저장은 원자적 compare-and-swap으로
    /// 수행되므로, 같은 토큰으로 동시에 들어온 두 갱신 요청 중
    /// 하나만 성공합니다.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` - 위조/형식 오류, 슬롯 불일치, 또는 동시 회전 패배
    /// * `SessionExpired` - 형식은 올바르지만 만료된 토큰
    /// * `UserNotFound` - 토큰은 유효하지만 계정이 사라진 경우
    pub async fn refresh(&self, provided_refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.tokens.validate_refresh_token(provided_refresh_token)?;
        let login_id = claims.login_id;

        let stored = self
            .token_store
            .get_refresh_token(&login_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !code::secrets_match(&stored, provided_refresh_token) {
            return Err(AppError::Unauthorized);
        }

        let user = self
            .users
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let pair = self.tokens.generate_token_pair(&user)?;

        let rotated = self
            .token_store
            .rotate_refresh_token(
                &login_id,
                provided_refresh_token,
                &pair.refresh_token,
                self.tokens.refresh_ttl(),
            )
            .await?;

        // 확인과 교체 사이에 다른 요청이 먼저 회전을 끝낸 경우
        if !rotated {
            return Err(AppError::Unauthorized);
        }

        Ok(pair)
    }

    /// 로그아웃
    ///
    /// 계정의 리프레시 토큰 슬롯을 무조건 삭제합니다. 저장된 값과의
    /// 일치는 요구하지 않습니다. 서명이 유효한 리프레시 토큰을 제시하는
    /// 것만으로 해당 계정의 세션을 해지하기에 충분합니다.
    ///
    /// # Errors
    ///
    /// * `Unauthorized` / `SessionExpired` - 갱신과 동일한 토큰 검증 실패
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let claims = self.tokens.validate_refresh_token(refresh_token)?;
        self.token_store.delete_refresh_token(&claims.login_id).await
    }
}
