use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use tasklane::auth::token::TokenCodec;
use tasklane::auth::{AuthMiddleware, BcryptHasher, JwtCodec};
use tasklane::config::Config;
use tasklane::repository::{PostgresTaskRepository, PostgresUserRepository};
use tasklane::routes;
use tasklane::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtCodec::new(
        config.jwt_secret.clone(),
        config.token_exp_minutes,
    ));
    let state = AppState {
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        task_repository: Arc::new(PostgresTaskRepository::new(pool)),
        password_hasher: Arc::new(BcryptHasher),
        token_codec: token_codec.clone(),
        token_exp_minutes: config.token_exp_minutes,
    };

    log::info!("Starting tasklane server at {}", config.server_url());
    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(AuthMiddleware::new(token_codec.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
