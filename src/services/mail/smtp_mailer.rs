//! SMTP 기반 메일 발송 구현
//!
//! lettre의 비동기 SMTP 전송을 사용합니다. 메시지 구성까지만
//! 요청 경로에서 수행하고, 실제 전송은 별도 태스크로 넘깁니다.
//! 인증 코드 요청이 SMTP 릴레이의 응답 속도에 묶이지 않습니다.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};

use super::{templates, Mailer};

/// SMTP 릴레이를 통한 메일 발송기
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// 새 SMTP 발송기를 생성합니다.
    ///
    /// STARTTLS 릴레이 연결을 구성합니다. 자격 증명이 비어 있으면
    /// 인증 없이 연결합니다 (로컬 릴레이용).
    ///
    /// # Errors
    ///
    /// * `InternalError` - 발신자 주소 또는 릴레이 설정이 잘못된 경우
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| AppError::InternalError(format!("발신자 주소 파싱 실패: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::InternalError(format!("SMTP 릴레이 설정 실패: {}", e)))?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username,
                config.smtp_password,
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// 메시지를 구성하고 전송을 백그라운드 태스크로 넘깁니다.
    fn dispatch(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|_| AppError::InvalidInput)?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::InternalError(format!("메일 메시지 구성 실패: {}", e)))?;

        let transport = self.transport.clone();
        tokio::spawn(async move {
            match transport.send(message).await {
                Ok(_) => log::debug!("메일 발송 완료: {}", to),
                Err(e) => log::warn!("메일 발송 실패 ({}): {}", to, e),
            }
        });

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.dispatch(
            to,
            templates::verification_subject(),
            templates::verification_body(code),
        )
    }

    async fn send_password_reset_code(&self, to: &str, code: &str) -> AppResult<()> {
        self.dispatch(
            to,
            templates::password_reset_subject(),
            templates::password_reset_body(code),
        )
    }
}
