//! 인증용 휘발성 비밀값 저장소
//!
//! `EphemeralStore` 위에 네 개의 독립된 네임스페이스를 얹습니다:
//!
//! | 네임스페이스 | 키 | 값 |
//! |---|---|---|
//! | 리프레시 토큰 | 로그인 아이디 | 토큰 원문 |
//! | 비밀번호 재설정 코드 | 사용자 ID | 코드의 SHA-256 해시 |
//! | 이메일 인증 코드 | 정규화된 이메일 | 코드의 SHA-256 해시 |
//! | 이메일 인증 완료 플래그 | 정규화된 이메일 | "1" |
//!
//! 각 네임스페이스는 키당 0개 또는 1개의 살아있는 값만 가지며,
//! 소유한 플로우 외에는 읽거나 쓰지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use crate::caching::EphemeralStore;
use crate::errors::AppResult;

const PREFIX_REFRESH: &str = "auth:refresh:";
const PREFIX_PWRESET: &str = "auth:pwreset:";
const PREFIX_EMAIL_CODE: &str = "auth:emailverify:code:";
const PREFIX_EMAIL_VERIFIED: &str = "auth:emailverify:verified:";

/// 인증 플로우 전용 휘발성 저장소
///
/// 저장소 구현(`RedisStore` 또는 `InMemoryStore`)은 생성 시점에
/// 명시적으로 주입됩니다.
pub struct TokenStore {
    store: Arc<dyn EphemeralStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    // ---- 리프레시 토큰 슬롯 ----

    /// 계정의 리프레시 토큰 슬롯을 새 값으로 덮어씁니다.
    ///
    /// 계정당 하나의 슬롯만 존재하므로, 저장과 동시에 이전 토큰은
    /// 무효화됩니다.
    pub async fn store_refresh_token(
        &self,
        login_id: &str,
        token: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        self.store.set(&key_refresh(login_id), token, ttl).await
    }

    /// 계정의 현재 리프레시 토큰을 조회합니다.
    pub async fn get_refresh_token(&self, login_id: &str) -> AppResult<Option<String>> {
        self.store.get(&key_refresh(login_id)).await
    }

    /// 저장된 토큰이 `expected`와 일치할 때만 새 토큰으로 회전합니다.
    ///
    /// 동시에 들어온 두 갱신 요청 중 하나만 성공하도록
    /// 비교와 교체가 원자적으로 수행됩니다.
    pub async fn rotate_refresh_token(
        &self,
        login_id: &str,
        expected: &str,
        new_token: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        self.store
            .compare_and_swap(&key_refresh(login_id), expected, new_token, ttl)
            .await
    }

    /// 계정의 리프레시 토큰 슬롯을 삭제(세션 해지)합니다.
    pub async fn delete_refresh_token(&self, login_id: &str) -> AppResult<()> {
        self.store.delete(&key_refresh(login_id)).await
    }

    // ---- 비밀번호 재설정 코드 ----

    pub async fn store_password_reset_code(
        &self,
        user_id: &str,
        code_hash: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        self.store
            .set(&key_password_reset(user_id), code_hash, ttl)
            .await
    }

    pub async fn get_password_reset_code(&self, user_id: &str) -> AppResult<Option<String>> {
        self.store.get(&key_password_reset(user_id)).await
    }

    pub async fn delete_password_reset_code(&self, user_id: &str) -> AppResult<()> {
        self.store.delete(&key_password_reset(user_id)).await
    }

    // ---- 이메일 인증 코드 ----

    pub async fn store_email_verification_code(
        &self,
        email: &str,
        code_hash: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        self.store.set(&key_email_code(email), code_hash, ttl).await
    }

    pub async fn get_email_verification_code(&self, email: &str) -> AppResult<Option<String>> {
        self.store.get(&key_email_code(email)).await
    }

    pub async fn delete_email_verification_code(&self, email: &str) -> AppResult<()> {
        self.store.delete(&key_email_code(email)).await
    }

    // ---- 이메일 인증 완료 플래그 ----

    pub async fn store_email_verified(&self, email: &str, ttl: Duration) -> AppResult<()> {
        self.store.set(&key_email_verified(email), "1", ttl).await
    }

    pub async fn is_email_verified(&self, email: &str) -> AppResult<bool> {
        self.store.exists(&key_email_verified(email)).await
    }

    pub async fn delete_email_verified(&self, email: &str) -> AppResult<()> {
        self.store.delete(&key_email_verified(email)).await
    }
}

fn key_refresh(login_id: &str) -> String {
    format!("{}{}", PREFIX_REFRESH, login_id)
}

fn key_password_reset(user_id: &str) -> String {
    format!("{}{}", PREFIX_PWRESET, user_id)
}

fn key_email_code(email: &str) -> String {
    format!("{}{}", PREFIX_EMAIL_CODE, email)
}

fn key_email_verified(email: &str) -> String {
    format!("{}{}", PREFIX_EMAIL_VERIFIED, email)
}
