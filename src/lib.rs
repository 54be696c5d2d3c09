//! 핀트랙 인증 서비스
//!
//! FinTrack 개인 자산 관리 백엔드의 자격 증명/토큰 생명주기 서비스입니다.
//! JWT 기반의 액세스/리프레시 토큰 발급과 회전, 이메일 인증 코드,
//! 비밀번호 재설정 코드를 담당합니다.
//!
//! # Features
//!
//! - **JWT 인증**: 액세스/리프레시 토큰 기반 상태 없는 인증
//! - **토큰 회전**: 갱신마다 리프레시 토큰 교체, 계정당 세션 1개
//! - **이메일 인증**: 일회용 6자리 코드, 해시만 저장, TTL 10분
//! - **비밀번호 재설정**: 계정에 묶인 일회용 코드, 성공 시 전 세션 해지
//! - **명시적 DI**: 모든 서비스를 시작 시점에 조립하여 주입
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: 휘발성 비밀값 저장 (TTL 관리)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, DTO 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 인증 플로우 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Repo / Store    │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fintrack_auth_service::caching::{InMemoryStore, RedisStore};
//! use fintrack_auth_service::config::JwtConfig;
//! use fintrack_auth_service::services::auth::{AuthService, TokenService, TokenStore};
//!
//! // 저장소와 서비스를 명시적으로 조립
//! let token_service = Arc::new(TokenService::new(JwtConfig::from_env()));
//! let token_store = Arc::new(TokenStore::new(Arc::new(InMemoryStore::new())));
//! let auth = AuthService::new(users, hasher, token_service, token_store);
//!
//! let pair = auth.login("bob", "Password1").await?;
//! let rotated = auth.refresh(&pair.refresh_token).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
