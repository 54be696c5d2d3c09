//! 핀트랙 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use fintrack_auth_service::caching::RedisStore;
use fintrack_auth_service::config::{
    DatabaseConfig, Environment, JwtConfig, MailConfig, PasswordConfig, StoreConfig,
};
use fintrack_auth_service::core::state::AppState;
use fintrack_auth_service::db::Database;
use fintrack_auth_service::repositories::users::MongoUserRepository;
use fintrack_auth_service::routes::configure_all_routes;
use fintrack_auth_service::services::auth::{
    AuthService, BcryptHasher, EmailVerificationService, PasswordResetService, TokenService,
    TokenStore,
};
use fintrack_auth_service::services::mail::SmtpMailer;
use fintrack_auth_service::services::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 핀트랙 인증 서비스 시작중...");
    info!("실행 환경: {:?}", Environment::current());

    // 데이터 스토어 연결 및 서비스 조립
    let state = initialize_app_state().await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

/// 저장소를 연결하고 전체 서비스 그래프를 조립합니다
///
/// 모든 의존성은 여기에서 명시적으로 생성되고 주입됩니다.
/// 연결 실패 시 애플리케이션이 종료됩니다.
async fn initialize_app_state() -> web::Data<AppState> {
    info!("📡 데이터 저장소 연결 중...");

    let database_config = DatabaseConfig::from_env();
    let database = Database::connect(database_config.clone())
        .await
        .expect("데이터베이스 연결 실패");

    let redis_store = Arc::new(
        RedisStore::connect(StoreConfig::from_env())
            .await
            .expect("Redis 연결 실패"),
    );

    let user_repo = Arc::new(MongoUserRepository::new(
        &database,
        database_config.command_timeout,
    ));
    user_repo
        .create_indexes()
        .await
        .expect("users 인덱스 생성 실패");

    let token_service = Arc::new(TokenService::new(JwtConfig::from_env()));
    let token_store = Arc::new(TokenStore::new(redis_store));
    let hasher = Arc::new(BcryptHasher::new(&PasswordConfig::from_env()));
    let mailer = Arc::new(SmtpMailer::new(MailConfig::from_env()).expect("SMTP 발송기 설정 실패"));

    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        hasher.clone(),
        token_service.clone(),
        token_store.clone(),
    ));
    let email_verification_service = Arc::new(EmailVerificationService::new(
        token_store.clone(),
        mailer.clone(),
    ));
    let password_reset_service = Arc::new(PasswordResetService::new(
        user_repo.clone(),
        token_store.clone(),
        hasher.clone(),
        mailer,
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        hasher,
        email_verification_service.clone(),
        token_store,
    ));

    web::Data::new(AppState {
        token_service,
        auth_service,
        email_verification_service,
        password_reset_service,
        user_service,
    })
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = "127.0.0.1:8080";

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API 엔드포인트: http://{}/api/v1", bind_address);

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS 설정입니다.
/// 개발환경에서 로컬호스트 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
