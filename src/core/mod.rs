//! 애플리케이션 코어 모듈

pub mod state;

pub use state::AppState;
