//! # Redis 기반 휘발성 저장소 구현
//!
//! Redis를 백엔드로 하는 `EphemeralStore` 구현을 제공합니다.
//! Spring Framework의 `StringRedisTemplate`과 유사한 역할을 수행합니다.
//!
//! ## 설계 철학
//!
//! - **비동기 우선**: 모든 작업이 async/await 기반으로 구현
//! - **제한 시간**: 모든 명령에 설정 가능한 타임아웃 적용.
//!   타임아웃은 `TimeoutError`, 그 외 실패는 `StoreError`로 표면화
//! - **원자적 교체**: compare-and-swap은 서버 사이드 Lua 스크립트로
//!   단일 왕복에 수행
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script};

use crate::config::StoreConfig;
use crate::errors::{AppError, AppResult};

use super::EphemeralStore;

/// 저장된 값이 기대값과 일치할 때만 새 값으로 교체하는 스크립트.
/// GET-비교-SET이 서버에서 원자적으로 수행된다.
const COMPARE_AND_SWAP_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
  return 1
else
  return 0
end
"#;

/// Redis 휘발성 저장소 클라이언트
///
/// 애플리케이션 시작 시 `RedisStore::connect`로 생성되어
/// 토큰 스토어에 명시적으로 주입됩니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::{EphemeralStore, RedisStore};
/// use crate::config::StoreConfig;
///
/// let store = RedisStore::connect(StoreConfig::from_env()).await?;
/// store.set("auth:refresh:bob", token, Duration::from_secs(604800)).await?;
/// ```
pub struct RedisStore {
    client: Client,
    command_timeout: Duration,
    cas_script: Script,
}

impl RedisStore {
    /// 새 Redis 저장소 연결을 생성합니다.
    ///
    /// 생성 시 PING 명령으로 서버 가용성을 확인하므로,
    /// 설정이 잘못된 채 기동되는 일을 막습니다.
    ///
    /// # Errors
    ///
    /// * `StoreError` - 잘못된 URL 또는 연결/인증 실패
    pub async fn connect(config: StoreConfig) -> AppResult<Self> {
        let client = Client::open(config.url.clone())
            .map_err(|e| AppError::StoreError(format!("Redis URL 파싱 실패: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::StoreError(format!("Redis 연결 실패: {}", e)))?;

        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::StoreError(format!("Redis PING 실패: {}", e)))?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self {
            client,
            command_timeout: config.command_timeout,
            cas_script: Script::new(COMPARE_AND_SWAP_SCRIPT),
        })
    }

    /// 명령 future에 제한 시간을 적용하고 에러를 분류합니다.
    async fn run<T, F>(&self, op: &'static str, fut: F) -> AppResult<T>
    where
        F: std::future::Future<Output = Result<T, redis::RedisError>>,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::StoreError(format!("{}: {}", op, e))),
            Err(_) => Err(AppError::TimeoutError(format!(
                "Redis {} 명령이 {}ms 안에 완료되지 않았습니다",
                op,
                self.command_timeout.as_millis()
            ))),
        }
    }

    /// SETEX는 0초 TTL을 허용하지 않으므로 최소 1초로 보정합니다.
    fn ttl_secs(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }
}

#[async_trait]
impl EphemeralStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let fut = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            conn.set_ex::<_, _, ()>(key, value, Self::ttl_secs(ttl)).await
        };
        self.run("SETEX", fut).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let fut = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            conn.get::<_, Option<String>>(key).await
        };
        self.run("GET", fut).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let fut = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            conn.del::<_, ()>(key).await
        };
        self.run("DEL", fut).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let fut = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            conn.exists::<_, bool>(key).await
        };
        self.run("EXISTS", fut).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new_value: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        let fut = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            self.cas_script
                .key(key)
                .arg(expected)
                .arg(new_value)
                .arg(Self::ttl_secs(ttl))
                .invoke_async::<i64>(&mut conn)
                .await
        };
        let swapped = self.run("EVALSHA", fut).await?;
        Ok(swapped == 1)
    }
}
