//! 메일 발송 설정 모듈
//!
//! SMTP 릴레이 연결 정보를 관리합니다.
//!
//! ## 환경 변수 설정
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_PORT="587"
//! export SMTP_USERNAME="noreply@fintrack.app"
//! export SMTP_PASSWORD="app-specific-password"
//! export MAIL_FROM="FinTrack <noreply@fintrack.app>"
//! ```

use std::env;

/// SMTP 메일 발송 설정
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP 서버 호스트 (예: smtp.gmail.com)
    pub smtp_host: String,
    /// SMTP 서버 포트 (TLS 기준 587)
    pub smtp_port: u16,
    /// SMTP 인증 사용자명
    pub smtp_username: String,
    /// SMTP 인증 비밀번호 (앱 비밀번호 권장)
    pub smtp_password: String,
    /// 발신자 주소
    pub from_address: String,
}

impl MailConfig {
    /// 환경 변수에서 메일 설정을 로드합니다.
    ///
    /// `SMTP_HOST` 미설정 시 localhost를 사용합니다.
    /// 개발 환경에서 실제 릴레이 없이 구동하면 발송은 백그라운드에서
    /// 실패하고 경고 로그만 남습니다. 요청 경로는 영향을 받지 않습니다.
    pub fn from_env() -> Self {
        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| {
            log::warn!("SMTP_HOST not set, using localhost (mail delivery will likely fail)");
            "localhost".to_string()
        });

        let smtp_port = env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(587);

        let smtp_username = env::var("SMTP_USERNAME").unwrap_or_default();
        let smtp_password = env::var("SMTP_PASSWORD").unwrap_or_default();

        let from_address = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "FinTrack <noreply@fintrack.app>".to_string());

        Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
        }
    }
}
