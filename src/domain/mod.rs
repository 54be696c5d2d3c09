//! 도메인 계층 모듈
//!
//! 엔티티, 토큰 모델, 요청/응답 DTO를 제공합니다.

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::request::{
    EmailVerificationConfirmRequest, EmailVerificationRequest, LoginRequest,
    PasswordResetConfirmRequest, PasswordResetRequest, RefreshTokenRequest, SignupRequest,
    UpdateProfileRequest,
};
pub use dto::response::{SignupResponse, TokenResponse, UserResponse};
pub use entities::users::user::User;
pub use models::token::{TokenClaims, TokenKind, TokenPair};
