//! 비밀번호 해싱 추상화
//!
//! Spring Security의 `PasswordEncoder`와 동일한 역할의 계약입니다.
//! 인증 플로우는 해싱 방식의 세부를 알지 못하며,
//! `matches`/`encode` 능력만 소비합니다.

use crate::config::PasswordConfig;
use crate::errors::{AppError, AppResult};

/// 비밀번호 해싱 계약
pub trait PasswordHasher: Send + Sync {
    /// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
    fn matches(&self, plain: &str, hash: &str) -> bool;

    /// 평문 비밀번호를 해시합니다.
    fn encode(&self, plain: &str) -> AppResult<String>;
}

/// bcrypt 기반 해셔
///
/// 적응형 해시 함수로 무차별 대입 공격을 방어합니다.
/// cost factor는 `PasswordConfig`에서 주입됩니다.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// 테스트용 저비용 해셔 (cost 4)
    #[cfg(test)]
    pub fn fast() -> Self {
        Self { cost: 4 }
    }
}

impl PasswordHasher for BcryptHasher {
    fn matches(&self, plain: &str, hash: &str) -> bool {
        // 손상된 해시는 불일치로 처리
        bcrypt::verify(plain, hash).unwrap_or(false)
    }

    fn encode(&self, plain: &str) -> AppResult<String> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }
}
