//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기(가입, 프로필 수정, 삭제)를 관리하는
//! 비즈니스 로직을 구현합니다. Spring Framework의 UserService 패턴을
//! 참고하여 설계되었습니다.
//!
//! ## 인증 코어와의 상호작용
//!
//! - **가입/이메일 변경**: `EmailVerificationService`의 단회성 게이트
//!   (`assert_verified_and_consume`)를 통과해야 합니다.
//! - **로그인 아이디 변경**: 리프레시 토큰 슬롯의 키가 로그인 아이디이므로
//!   이전 아이디의 슬롯을 해지합니다.
//! - **계정 삭제**: 리프레시 토큰, 재설정 코드, 이메일 인증 상태를
//!   모두 정리한 뒤 영속 레코드를 삭제합니다.

use std::sync::Arc;

use crate::domain::dto::request::{SignupRequest, UpdateProfileRequest};
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::email_verification_service::EmailVerificationService;
use crate::services::auth::password_hasher::PasswordHasher;
use crate::services::auth::token_store::TokenStore;
use crate::utils::string_utils::{clean_optional_string, require_trimmed};

/// 사용자 계정 생명주기 서비스
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    email_verification: Arc<EmailVerificationService>,
    token_store: Arc<TokenStore>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        email_verification: Arc<EmailVerificationService>,
        token_store: Arc<TokenStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            email_verification,
            token_store,
        }
    }

    /// 회원가입
    ///
    /// 가입 전 해당 이메일의 인증이 완료되어 있어야 하며,
    /// 가입 성공 시 그 인증 상태는 소비됩니다. 같은 인증으로
    /// 두 번 가입할 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `DuplicateLoginId` / `DuplicateEmail` - 이미 사용 중인 값
    /// * `EmailVerificationRequired` - 이메일 인증이 선행되지 않음
    pub async fn signup(&self, request: SignupRequest) -> AppResult<User> {
        if self.users.exists_by_login_id(&request.login_id).await? {
            return Err(AppError::DuplicateLoginId);
        }

        if self.users.exists_by_email(&request.email).await? {
            return Err(AppError::DuplicateEmail);
        }

        self.email_verification
            .assert_verified_and_consume(&request.email)
            .await?;

        let password_hash = self.hasher.encode(&request.password)?;
        let user = User::new(
            request.login_id,
            request.email,
            password_hash,
            request.nickname,
        );

        self.users.insert(user).await
    }

    /// 프로필 조회
    pub async fn get_profile(&self, login_id: &str) -> AppResult<User> {
        let login_id = require_trimmed(login_id)?;

        self.users
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// 프로필 수정
    ///
    /// 어떤 변경이든 현재 비밀번호 확인이 필요합니다.
    /// 이메일 변경은 새 주소에 대한 인증 소비를, 로그인 아이디 변경은
    /// 이전 아이디의 세션 해지를 동반합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - 변경할 필드가 하나도 없는 경우
    /// * `InvalidPassword` - 현재 비밀번호 불일치
    /// * `DuplicateLoginId` / `DuplicateEmail` - 이미 사용 중인 값
    /// * `EmailVerificationRequired` - 새 이메일의 인증이 선행되지 않음
    pub async fn update_profile(
        &self,
        current_login_id: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<User> {
        let current_login_id = require_trimmed(current_login_id)?;

        let mut user = self
            .users
            .find_by_login_id(&current_login_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let new_login_id = clean_optional_string(request.new_login_id);
        let new_email = clean_optional_string(request.new_email);
        let new_nickname = clean_optional_string(request.new_nickname);

        if new_login_id.is_none() && new_email.is_none() && new_nickname.is_none() {
            return Err(AppError::InvalidInput);
        }

        let current_password = request.current_password.trim();
        if current_password.is_empty()
            || !self.hasher.matches(current_password, &user.password_hash)
        {
            return Err(AppError::InvalidPassword);
        }

        let mut login_id_changed = false;

        if let Some(login_id) = new_login_id {
            if login_id != user.login_id {
                if self.users.exists_by_login_id(&login_id).await? {
                    return Err(AppError::DuplicateLoginId);
                }
                user.update_login_id(login_id);
                login_id_changed = true;
            }
        }

        if let Some(email) = new_email {
            if !email.eq_ignore_ascii_case(&user.email) {
                if self.users.exists_by_email(&email).await? {
                    return Err(AppError::DuplicateEmail);
                }
                self.email_verification
                    .assert_verified_and_consume(&email)
                    .await?;
                user.update_email(email);
            }
        }

        if let Some(nickname) = new_nickname {
            if nickname != user.nickname {
                user.update_nickname(nickname);
            }
        }

        self.users.update(&user).await?;

        // 슬롯 키가 로그인 아이디이므로 이전 키의 세션을 해지한다
        if login_id_changed {
            self.token_store
                .delete_refresh_token(&current_login_id)
                .await?;
        }

        Ok(user)
    }

    /// 계정 삭제
    ///
    /// 휘발성 비밀값(세션, 재설정 코드, 이메일 인증 상태)을 정리한 뒤
    /// 영속 레코드를 삭제합니다.
    pub async fn delete_account(&self, login_id: &str) -> AppResult<()> {
        let login_id = require_trimmed(login_id)?;

        let user = self
            .users
            .find_by_login_id(&login_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.token_store.delete_refresh_token(&user.login_id).await?;
        self.token_store
            .delete_password_reset_code(&user_id.to_hex())
            .await?;
        self.email_verification.delete_by_email(&user.email).await;

        self.users.delete(&user_id).await
    }
}
