//! 비밀번호 재설정 서비스 구현
//!
//! 일회용 재설정 코드의 발급과 확정을 담당합니다.
//!
//! ## 보안 설계
//!
//! - 재설정 코드는 임의의 메일함이 아니라 **계정**에 묶입니다.
//!   저장 키는 이메일이 아닌 사용자 ID입니다.
//! - 발급 요청에서 이메일이 계정의 이메일과 다르면 "이메일이 틀렸다"가
//!   아니라 일반 `InvalidInput`으로 응답합니다. 계정-이메일 연결을
//!   추측하는 통로를 막기 위함입니다.
//! - 확정 요청에서 존재하지 않는 계정은 `UserNotFound`가 아니라
//!   `InvalidResetCode`로 응답합니다. 이 엔드포인트로 계정 존재 여부를
//!   확인할 수 없습니다.
//! - 재설정이 성공하면 계정의 리프레시 토큰 슬롯을 해지하여
//!   모든 기기에서 재로그인을 강제합니다.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserRepository;
use crate::services::mail::Mailer;
use crate::utils::string_utils::{require_trimmed, trim_to_none};

use super::code;
use super::password_hasher::PasswordHasher;
use super::token_store::TokenStore;

/// 재설정 코드의 유효 시간
const RESET_TTL: Duration = Duration::from_secs(10 * 60);

/// 비밀번호 재설정 플로우 서비스
pub struct PasswordResetService {
    users: Arc<dyn UserRepository>,
    token_store: Arc<TokenStore>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        token_store: Arc<TokenStore>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            token_store,
            hasher,
            mailer,
        }
    }

    /// 재설정 코드를 발급하고 계정 이메일로 발송합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 필수 입력이 비어 있거나, 이메일이 계정의
    ///   이메일과 일치하지 않는 경우 (대소문자 무시 비교)
    /// * `UserNotFound` - 로그인 아이디에 해당하는 계정이 없는 경우
    pub async fn request_reset(&self, login_id: &str, email: &str) -> AppResult<()> {
        let login_id = require_trimmed(login_id)?;
        let email = require_trimmed(email)?;

        let user = self
            .users
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let saved_email = trim_to_none(&user.email).ok_or(AppError::InvalidInput)?;
        if !saved_email.eq_ignore_ascii_case(&email) {
            return Err(AppError::InvalidInput);
        }

        let user_id = user
            .id_hex()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let code = code::generate_six_digit_code();
        let code_hash = code::sha256_hex(&code);

        self.token_store
            .store_password_reset_code(&user_id, &code_hash, RESET_TTL)
            .await?;

        self.mailer
            .send_password_reset_code(&user.email, &code)
            .await?;
        Ok(())
    }

    /// 재설정 코드를 확인하고 새 비밀번호를 저장합니다.
    ///
    /// 성공 시 재설정 코드를 삭제하고 계정의 리프레시 토큰 슬롯을
    /// 해지합니다. 이전에 발급된 모든 리프레시 토큰은 더 이상 갱신에
    /// 사용할 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 필수 입력이 비어 있는 경우
    /// * `InvalidResetCode` - 계정이 없거나, 코드가 없거나, 코드가
    ///   일치하지 않는 경우. 세 경우는 구분되지 않습니다.
    /// * `SameAsOldPassword` - 새 비밀번호가 현재 비밀번호와 같은 경우.
    ///   코드와 비밀번호는 변경되지 않습니다.
    pub async fn confirm_reset(
        &self,
        login_id: &str,
        code: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let login_id = require_trimmed(login_id)?;
        let code = require_trimmed(code)?;
        let new_password = require_trimmed(new_password)?;

        let mut user = self
            .users
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AppError::InvalidResetCode)?;

        let user_id = user
            .id_hex()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let stored_hash = self
            .token_store
            .get_password_reset_code(&user_id)
            .await?
            .ok_or(AppError::InvalidResetCode)?;

        let input_hash = code::sha256_hex(&code);
        if !code::secrets_match(&stored_hash, &input_hash) {
            return Err(AppError::InvalidResetCode);
        }

        if self.hasher.matches(&new_password, &user.password_hash) {
            return Err(AppError::SameAsOldPassword);
        }

        let new_hash = self.hasher.encode(&new_password)?;
        user.update_password(new_hash);
        self.users.update(&user).await?;

        self.token_store.delete_password_reset_code(&user_id).await?;
        self.token_store.delete_refresh_token(&user.login_id).await?;
        Ok(())
    }
}
