//! 서비스 테스트 공용 더블
//!
//! Redis/MongoDB/SMTP 없이 플로우 로직을 검증하기 위한
//! 인메모리 구현들입니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::user::User;
use crate::errors::AppResult;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::password_hasher::{BcryptHasher, PasswordHasher};
use crate::services::mail::Mailer;

/// 인메모리 사용자 리포지토리
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 중 계정 소멸을 흉내낸다
    pub fn remove_by_login_id(&self, login_id: &str) {
        self.users
            .lock()
            .unwrap()
            .retain(|u| u.login_id != login_id);
    }

    /// 저장된 상태를 검증용으로 복사한다
    pub fn snapshot_by_login_id(&self, login_id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.login_id == login_id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        Ok(self.snapshot_by_login_id(login_id))
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        Ok(self.snapshot_by_login_id(login_id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email))
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        user.id = Some(ObjectId::new());
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        self.users.lock().unwrap().retain(|u| u.id != Some(*id));
        Ok(())
    }
}

/// 발송된 코드를 기록하는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    verification: Mutex<Vec<(String, String)>>,
    reset: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_verification_code(&self) -> Option<String> {
        self.verification
            .lock()
            .unwrap()
            .last()
            .map(|(_, code)| code.clone())
    }

    pub fn last_reset_code(&self) -> Option<String> {
        self.reset.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn verification_count(&self) -> usize {
        self.verification.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.verification
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_password_reset_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.reset
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// 비밀번호가 해시된 테스트 사용자를 만든다
pub fn hashed_user(login_id: &str, email: &str, password: &str) -> User {
    let hasher = BcryptHasher::fast();
    User::new(
        login_id.to_string(),
        email.to_string(),
        hasher.encode(password).unwrap(),
        format!("{}-nick", login_id),
    )
}
