//! 인메모리 휘발성 저장소 구현
//!
//! Redis 없이 구동하는 로컬 개발과 서비스 단위 테스트를 위한
//! `EphemeralStore` 구현입니다. 만료는 조회 시점에 검사합니다.
//! 별도의 청소 스레드는 없지만, 만료된 키는 절대 조회되지 않으므로
//! 계약을 만족합니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::errors::AppResult;

use super::EphemeralStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 프로세스 내 TTL 키-값 저장소
///
/// 모든 연산이 단일 뮤텍스 아래에서 수행되므로
/// `compare_and_swap`은 자연스럽게 원자적입니다.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EphemeralStore for InMemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(false)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        new_value: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        let matches = match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                false
            }
            Some(entry) => entry.value == expected,
            None => false,
        };

        if matches {
            entries.insert(
                key.to_string(),
                Entry {
                    value: new_value.to_string(),
                    expires_at: Instant::now() + ttl,
                },
            );
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryStore::new();
        store.set("k", "v", TTL).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
        assert!(store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_key_is_unreadable() {
        let store = InMemoryStore::new();
        store.set("k", "v", Duration::ZERO).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(!store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let store = InMemoryStore::new();
        store.set("k", "old", TTL).await.unwrap();
        store.set("k", "new", TTL).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryStore::new();
        store.set("k", "v", TTL).await.unwrap();

        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_compare_and_swap_success() {
        let store = InMemoryStore::new();
        store.set("k", "old", TTL).await.unwrap();

        let swapped = store.compare_and_swap("k", "old", "new", TTL).await.unwrap();

        assert!(swapped);
        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_compare_and_swap_mismatch_leaves_value() {
        let store = InMemoryStore::new();
        store.set("k", "current", TTL).await.unwrap();

        let swapped = store
            .compare_and_swap("k", "something-else", "new", TTL)
            .await
            .unwrap();

        assert!(!swapped);
        assert_eq!(store.get("k").await.unwrap(), Some("current".to_string()));
    }

    #[tokio::test]
    async fn test_compare_and_swap_absent_key() {
        let store = InMemoryStore::new();

        let swapped = store.compare_and_swap("k", "old", "new", TTL).await.unwrap();

        assert!(!swapped);
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
