//! 메일 제목/본문 템플릿

/// 이메일 인증 코드 메일 제목
pub fn verification_subject() -> &'static str {
    "[FinTrack] Email verification code"
}

/// 이메일 인증 코드 메일 본문
pub fn verification_body(code: &str) -> String {
    format!(
        "안녕하세요, FinTrack입니다.\n\n\
         이메일 인증 코드: {}\n\n\
         이 코드는 10분 동안 유효합니다.\n\
         본인이 요청하지 않았다면 이 메일을 무시해 주세요.",
        code
    )
}

/// 비밀번호 재설정 코드 메일 제목
pub fn password_reset_subject() -> &'static str {
    "[FinTrack] Password reset code"
}

/// 비밀번호 재설정 코드 메일 본문
pub fn password_reset_body(code: &str) -> String {
    format!(
        "안녕하세요, FinTrack입니다.\n\n\
         비밀번호 재설정 코드: {}\n\n\
         이 코드는 10분 동안 유효합니다.\n\
         본인이 요청하지 않았다면 비밀번호를 변경하지 마시고\n\
         고객센터로 문의해 주세요.",
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_contain_code() {
        assert!(verification_body("042917").contains("042917"));
        assert!(password_reset_body("042917").contains("042917"));
    }
}
