//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰을 페어링 한 정보를 표시합니다.

use serde::{Deserialize, Serialize};

/// 토큰 용도 구분 클레임
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 `token_type` 클레임을 갖기
/// 때문에 둘을 맞바꿔 쓸 수 없습니다. 액세스 토큰을 리프레시 엔드포인트에
/// 제시하면 서명이 유효하더라도 거부됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// API 접근용 단기 토큰
    Access,
    /// 토큰 갱신용 장기 토큰
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `login_id`: 로그인 아이디 (리프레시 토큰 슬롯 조회용)
/// - `token_type`: 토큰 용도 (access / refresh)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 로그인 아이디
    pub login_id: String,
    /// 토큰 용도
    pub token_type: TokenKind,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 로그인과 토큰 갱신 성공 시 클라이언트에게 전달되는 토큰 집합입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenKind::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenKind::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[test]
    fn test_token_kind_roundtrip() {
        let kind: TokenKind = serde_json::from_str("\"refresh\"").unwrap();
        assert_eq!(kind, TokenKind::Refresh);
    }
}
