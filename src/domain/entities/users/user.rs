//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로그인 아이디 기반 로컬 인증을 위한 영속 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 영속화는 외부 리포지토리가 담당하며, 인증 플로우는 이 엔티티를
/// 읽고 비밀번호 해시 변경을 리포지토리에 위임할 뿐입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 아이디 (unique)
    pub login_id: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 표시 이름
    pub nickname: String,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 비밀번호는 이미 해시된 상태로 전달되어야 합니다.
    pub fn new(login_id: String, email: String, password_hash: String, nickname: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            login_id,
            email,
            password_hash,
            nickname,
            created_at: now,
            updated_at: now,
        }
    }

    /// 사용자 ID를 16진수 문자열로 반환합니다.
    ///
    /// 아직 저장되지 않은 사용자는 `None`을 반환합니다.
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|oid| oid.to_hex())
    }

    /// 비밀번호 해시를 교체합니다.
    pub fn update_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// 로그인 아이디를 교체합니다.
    pub fn update_login_id(&mut self, login_id: String) {
        self.login_id = login_id;
        self.touch();
    }

    /// 이메일을 교체합니다.
    pub fn update_email(&mut self, email: String) {
        self.email = email;
        self.touch();
    }

    /// 표시 이름을 교체합니다.
    pub fn update_nickname(&mut self, nickname: String) {
        self.nickname = nickname;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}
