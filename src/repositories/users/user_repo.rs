//! # 사용자 리포지토리
//!
//! 영속 사용자 레코드에 대한 데이터 액세스 계층입니다.
//! Spring Data JPA의 `UserRepository` 인터페이스와 유사한 역할을 수행하며,
//! 인증 플로우는 trait을 통해서만 사용자 레코드에 접근합니다.
//!
//! 모든 호출에는 제한 시간이 적용됩니다. 제한 시간 초과는
//! `TimeoutError`로 표면화되어 "사용자 없음"과 구분됩니다.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};

/// 사용자 레코드 저장소 계약
///
/// 인증 코어가 소비하는 외부 협력자 인터페이스입니다.
/// 비밀번호 해시 변경을 포함한 모든 영속화는 이 trait을 통해 수행됩니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 로그인 아이디로 사용자를 조회합니다.
    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>>;

    /// 로그인 아이디 사용 여부를 확인합니다.
    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool>;

    /// 이메일 사용 여부를 확인합니다.
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// 새 사용자를 저장하고 ID가 채워진 엔티티를 반환합니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 사용자 레코드 전체를 갱신합니다.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// 사용자를 삭제합니다.
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
}

/// MongoDB 기반 사용자 리포지토리
pub struct MongoUserRepository {
    collection: Collection<User>,
    command_timeout: Duration,
}

impl MongoUserRepository {
    /// 새 리포지토리 인스턴스를 생성합니다.
    pub fn new(database: &Database, command_timeout: Duration) -> Self {
        Self {
            collection: database.database().collection("users"),
            command_timeout,
        }
    }

    /// 유니크 인덱스를 생성합니다.
    ///
    /// 로그인 아이디와 이메일의 중복을 데이터베이스 수준에서 차단합니다.
    /// 애플리케이션 시작 시 한 번 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let login_id_index = IndexModel::builder()
            .keys(doc! { "login_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_indexes([login_id_index, email_index])
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        log::info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }

    /// 데이터베이스 호출에 제한 시간을 적용하고 에러를 분류합니다.
    async fn run<T, F>(&self, op: &'static str, fut: F) -> AppResult<T>
    where
        F: std::future::IntoFuture<Output = Result<T, mongodb::error::Error>>,
    {
        match tokio::time::timeout(self.command_timeout, fut.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::DatabaseError(format!("{}: {}", op, e))),
            Err(_) => Err(AppError::TimeoutError(format!(
                "데이터베이스 {} 호출이 {}ms 안에 완료되지 않았습니다",
                op,
                self.command_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        self.run(
            "find_by_login_id",
            self.collection.find_one(doc! { "login_id": login_id }),
        )
        .await
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        let count = self
            .run(
                "exists_by_login_id",
                self.collection
                    .count_documents(doc! { "login_id": login_id }),
            )
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = self
            .run(
                "exists_by_email",
                self.collection.count_documents(doc! { "email": email }),
            )
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self
            .run("insert", self.collection.insert_one(&user))
            .await?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자는 갱신할 수 없습니다".to_string()))?;

        self.run(
            "update",
            self.collection.replace_one(doc! { "_id": id }, user),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        self.run("delete", self.collection.delete_one(doc! { "_id": id }))
            .await?;
        Ok(())
    }
}
