//! 일회용 코드 생성 및 해시 유틸리티
//!
//! 이메일 인증과 비밀번호 재설정에 쓰이는 6자리 코드를 생성하고,
//! 저장용 해시를 계산합니다. 코드 평문은 메일 발송 직후 버려지며
//! 저장소에는 SHA-256 해시만 보관됩니다.

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// 균등 분포의 6자리 십진수 코드를 생성합니다.
///
/// 앞자리 0이 보존됩니다 (예: "004217").
pub fn generate_six_digit_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

/// SHA-256 해시의 16진수 표현을 계산합니다.
pub fn sha256_hex(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 비밀값 두 개를 상수 시간에 비교합니다.
///
/// 단순 `==` 비교는 일치하는 접두사 길이에 따라 실행 시간이 달라져
/// 타이밍 채널이 될 수 있습니다. 저장된 해시와 입력 해시,
/// 저장된 토큰과 제시된 토큰의 비교에는 반드시 이 함수를 사용합니다.
pub fn secrets_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
