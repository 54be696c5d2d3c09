//! 이메일 인증 서비스 구현
//!
//! 일회용 이메일 인증 코드의 발급과 확인, 그리고 회원가입/이메일 변경이
//! 사용하는 "인증 확인 후 소비" 게이트를 제공합니다.
//!
//! ## 코드 생명주기
//!
//! 1. `request_verification`: 6자리 코드 생성 → 해시만 저장 (TTL 10분) → 메일 발송
//! 2. `confirm_verification`: 해시 비교 성공 시 코드 삭제 + 인증 완료 플래그 저장
//! 3. `assert_verified_and_consume`: 플래그 확인 후 플래그와 잔여 코드를 모두 삭제
//!
//! 재요청에 대한 횟수 제한은 없습니다. 새 코드가 이전 코드를 덮어쓰므로
//! 항상 가장 최근 코드만 유효합니다.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::services::mail::Mailer;
use crate::utils::string_utils::{require_trimmed, trim_to_none};

use super::code;
use super::token_store::TokenStore;

/// 인증 코드와 인증 완료 플래그의 유효 시간
const VERIFICATION_TTL: Duration = Duration::from_secs(10 * 60);

/// 이메일 인증 플로우 서비스
pub struct EmailVerificationService {
    token_store: Arc<TokenStore>,
    mailer: Arc<dyn Mailer>,
}

impl EmailVerificationService {
    pub fn new(token_store: Arc<TokenStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            token_store,
            mailer,
        }
    }

    /// 인증 코드를 발급하고 메일로 발송합니다.
    ///
    /// 같은 이메일로 재요청하면 이전 코드는 덮어써져 무효화됩니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 이메일이 비어 있는 경우
    pub async fn request_verification(&self, email: &str) -> AppResult<()> {
        let email = require_trimmed(email)?;

        let code = code::generate_six_digit_code();
        let code_hash = code::sha256_hex(&code);

        self.token_store
            .store_email_verification_code(&email, &code_hash, VERIFICATION_TTL)
            .await?;

        self.mailer.send_verification_code(&email, &code).await?;
        Ok(())
    }

    /// 인증 코드를 확인합니다.
    ///
    /// 성공 시 코드를 삭제하고 인증 완료 플래그를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 이메일 또는 코드가 비어 있는 경우
    /// * `InvalidVerificationCode` - 코드가 없거나 일치하지 않는 경우.
    ///   두 경우는 구분되지 않습니다.
    pub async fn confirm_verification(&self, email: &str, code: &str) -> AppResult<()> {
        let email = require_trimmed(email)?;
        let code = require_trimmed(code)?;

        let stored_hash = self
            .token_store
            .get_email_verification_code(&email)
            .await?
            .ok_or(AppError::InvalidVerificationCode)?;

        let input_hash = code::sha256_hex(&code);
        if !code::secrets_match(&stored_hash, &input_hash) {
            return Err(AppError::InvalidVerificationCode);
        }

        self.token_store
            .delete_email_verification_code(&email)
            .await?;
        self.token_store
            .store_email_verified(&email, VERIFICATION_TTL)
            .await?;
        Ok(())
    }

    /// 인증 완료 상태를 확인하고 소비합니다.
    ///
    /// 회원가입과 이메일 변경이 내부적으로 사용하는 게이트입니다.
    /// 성공 시 플래그와 잔여 코드를 모두 삭제하므로, 한 번의 인증은
    /// 정확히 한 번만 소비될 수 있습니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 이메일이 비어 있는 경우
    /// * `EmailVerificationRequired` - 인증 완료 플래그가 없는 경우
    pub async fn assert_verified_and_consume(&self, email: &str) -> AppResult<()> {
        let email = require_trimmed(email)?;

        if !self.token_store.is_email_verified(&email).await? {
            return Err(AppError::EmailVerificationRequired);
        }

        self.token_store.delete_email_verified(&email).await?;
        self.token_store
            .delete_email_verification_code(&email)
            .await?;
        Ok(())
    }

    /// 이메일에 연결된 인증 상태를 모두 정리합니다.
    ///
    /// 계정 삭제 시의 best-effort 청소입니다. 빈 입력은 무시하고,
    /// 저장소 오류는 경고 로그만 남기고 절대 실패를 전파하지 않습니다.
    pub async fn delete_by_email(&self, email: &str) {
        let Some(email) = trim_to_none(email) else {
            return;
        };

        if let Err(e) = self.token_store.delete_email_verification_code(&email).await {
            log::warn!("이메일 인증 코드 정리 실패 ({}): {}", email, e);
        }
        if let Err(e) = self.token_store.delete_email_verified(&email).await {
            log::warn!("이메일 인증 플래그 정리 실패 ({}): {}", email, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::InMemoryStore;
    use crate::services::auth::test_support::RecordingMailer;

    struct Fixture {
        service: EmailVerificationService,
        token_store: Arc<TokenStore>,
        mailer: Arc<RecordingMailer>,
    }

    fn fixture() -> Fixture {
        let token_store = Arc::new(TokenStore::new(Arc::new(InMemoryStore::new())));
        let mailer = Arc::new(RecordingMailer::new());
        let service = EmailVerificationService::new(token_store.clone(), mailer.clone());
        Fixture {
            service,
            token_store,
            mailer,
        }
    }

    #[tokio::test]
    async fn test_request_rejects_blank_email() {
        let f = fixture();

        assert!(matches!(
            f.service.request_verification("   ").await,
            Err(AppError::InvalidInput)
        ));
        assert_eq!(f.mailer.verification_count(), 0);
    }

    #[tokio::test]
    async fn test_request_stores_hash_not_plaintext() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();

        let code = f.mailer.last_verification_code().unwrap();
        let stored = f
            .token_store
            .get_email_verification_code("a@x.com")
            .await
            .unwrap()
            .unwrap();

        assert_ne!(stored, code);
        assert_eq!(stored, code::sha256_hex(&code));
    }

    #[tokio::test]
    async fn test_confirm_with_wrong_code_fails() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();

        let code = f.mailer.last_verification_code().unwrap();
        let wrong = if code == "000000" { "000001" } else { "000000" };

        assert!(matches!(
            f.service.confirm_verification("a@x.com", wrong).await,
            Err(AppError::InvalidVerificationCode)
        ));
    }

    #[tokio::test]
    async fn test_confirm_without_request_fails_with_same_error() {
        let f = fixture();

        // "코드 없음"도 "코드 틀림"과 같은 에러로 표면화된다
        assert!(matches!(
            f.service.confirm_verification("a@x.com", "123456").await,
            Err(AppError::InvalidVerificationCode)
        ));
    }

    #[tokio::test]
    async fn test_confirm_succeeds_exactly_once() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();
        let code = f.mailer.last_verification_code().unwrap();

        f.service
            .confirm_verification("a@x.com", &code)
            .await
            .unwrap();

        // 성공한 코드는 삭제되었으므로 재사용은 실패한다
        assert!(matches!(
            f.service.confirm_verification("a@x.com", &code).await,
            Err(AppError::InvalidVerificationCode)
        ));
    }

    #[tokio::test]
    async fn test_inputs_are_normalized() {
        let f = fixture();
        f.service
            .request_verification("  a@x.com  ")
            .await
            .unwrap();
        let code = f.mailer.last_verification_code().unwrap();

        f.service
            .confirm_verification(" a@x.com ", &format!(" {} ", code))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_repeated_request_invalidates_previous_code() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();
        let first = f.mailer.last_verification_code().unwrap();

        f.service.request_verification("a@x.com").await.unwrap();
        let second = f.mailer.last_verification_code().unwrap();

        if first != second {
            assert!(matches!(
                f.service.confirm_verification("a@x.com", &first).await,
                Err(AppError::InvalidVerificationCode)
            ));
        }
        f.service
            .confirm_verification("a@x.com", &second)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_assert_verified_requires_prior_confirm() {
        let f = fixture();

        assert!(matches!(
            f.service.assert_verified_and_consume("a@x.com").await,
            Err(AppError::EmailVerificationRequired)
        ));
    }

    #[tokio::test]
    async fn test_assert_verified_is_single_use() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();
        let code = f.mailer.last_verification_code().unwrap();
        f.service
            .confirm_verification("a@x.com", &code)
            .await
            .unwrap();

        f.service
            .assert_verified_and_consume("a@x.com")
            .await
            .unwrap();

        // 한 번 소비된 인증은 다시 쓸 수 없다
        assert!(matches!(
            f.service.assert_verified_and_consume("a@x.com").await,
            Err(AppError::EmailVerificationRequired)
        ));
    }

    #[tokio::test]
    async fn test_delete_by_email_clears_both_namespaces() {
        let f = fixture();
        f.service.request_verification("a@x.com").await.unwrap();
        let code = f.mailer.last_verification_code().unwrap();
        f.service
            .confirm_verification("a@x.com", &code)
            .await
            .unwrap();
        f.service.request_verification("a@x.com").await.unwrap();

        f.service.delete_by_email("a@x.com").await;

        assert!(!f.token_store.is_email_verified("a@x.com").await.unwrap());
        assert_eq!(
            f.token_store
                .get_email_verification_code("a@x.com")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_delete_by_email_ignores_blank_input() {
        let f = fixture();

        // 실패하지 않아야 한다
        f.service.delete_by_email("   ").await;
    }
}
